use std::collections::HashSet;

use crate::extract::{DependencyExtractor, FileAnnotator, FileMap, SourceFile};
use crate::types::{Dependency, FileNode};

/// Runs the registered extractors and annotators over single files and
/// owns the global edge deduplication.
pub struct DependencyBuilder {
    extractors: Vec<Box<dyn DependencyExtractor>>,
    annotators: Vec<Box<dyn FileAnnotator>>,
}

impl DependencyBuilder {
    pub fn new(
        extractors: Vec<Box<dyn DependencyExtractor>>,
        annotators: Vec<Box<dyn FileAnnotator>>,
    ) -> Self {
        Self {
            extractors,
            annotators,
        }
    }

    /// Edges recognized in one file by every extractor that handles its
    /// extension. Extractors that declare no extension set run on every
    /// file.
    pub fn extract_file(&self, file: &SourceFile, files: &FileMap) -> Vec<Dependency> {
        let mut edges = Vec::new();
        for extractor in &self.extractors {
            if extractor.handles(&file.extension) {
                edges.extend(extractor.extract(file, files));
            }
        }
        edges
    }

    pub fn annotate(&self, node: &mut FileNode, content: &str) {
        for annotator in &self.annotators {
            annotator.annotate(node, content);
        }
    }

    /// Global `(from, to, kind)` deduplication, keeping first-seen order
    /// so any batch completion order yields the same edge list.
    pub fn dedup(dependencies: Vec<Dependency>) -> Vec<Dependency> {
        let mut seen: HashSet<Dependency> = HashSet::new();
        let mut out = Vec::with_capacity(dependencies.len());
        for dep in dependencies {
            if seen.insert(dep.clone()) {
                out.push(dep);
            }
        }
        out
    }
}
