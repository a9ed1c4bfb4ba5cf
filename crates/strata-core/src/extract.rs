use std::collections::{BTreeSet, HashMap};

use crate::types::{Dependency, FileNode};

/// A supported file's text, handed to extractors. Paths are
/// workspace-relative with forward slashes.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: String,
    /// Lowercase extension with leading dot.
    pub extension: String,
    pub content: String,
}

/// Frozen snapshot of the project's supported files, built once after
/// scanning and read-only during extraction.
#[derive(Debug, Clone, Default)]
pub struct FileMap {
    paths: BTreeSet<String>,
    by_name: HashMap<String, Vec<String>>,
}

impl FileMap {
    pub fn new(paths: impl IntoIterator<Item = String>) -> Self {
        let mut map = FileMap::default();
        for path in paths {
            let name = match path.rfind('/') {
                Some(idx) => path[idx + 1..].to_string(),
                None => path.clone(),
            };
            map.by_name.entry(name).or_default().push(path.clone());
            map.paths.insert(path);
        }
        map
    }

    pub fn from_files(files: &[FileNode]) -> Self {
        Self::new(files.iter().map(|f| f.path.clone()))
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    /// Project files with exactly this file name (e.g. `User.java`),
    /// in path order.
    pub fn with_name(&self, name: &str) -> &[String] {
        self.by_name.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First candidate present in the map, if any.
    pub fn probe<'a>(&self, candidates: &'a [String]) -> Option<&'a str> {
        candidates
            .iter()
            .map(String::as_str)
            .find(|c| self.contains(c))
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Trait each dependency extractor implements. Recognition is lexical;
/// extractors emit at most real references and never follow macros or
/// templates.
pub trait DependencyExtractor: Send + Sync {
    /// Short name used in logs (e.g. "javascript").
    fn name(&self) -> &'static str;

    /// Extensions handled (leading dot), or `None` to run on every
    /// supported file (the database detector does this).
    fn extensions(&self) -> Option<&[&'static str]>;

    /// Outgoing edges recognized in the file's text. Deduplication across
    /// extractors happens later, globally.
    fn extract(&self, file: &SourceFile, files: &FileMap) -> Vec<Dependency>;

    fn handles(&self, extension: &str) -> bool {
        match self.extensions() {
            Some(exts) => exts.contains(&extension),
            None => true,
        }
    }
}

/// Trait for per-file enrichment (comments, elements, description).
pub trait FileAnnotator: Send + Sync {
    fn annotate(&self, node: &mut FileNode, content: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_map_lookup() {
        let map = FileMap::new([
            "src/a.ts".to_string(),
            "src/deep/User.java".to_string(),
            "other/User.java".to_string(),
        ]);
        assert!(map.contains("src/a.ts"));
        assert!(!map.contains("src/b.ts"));
        assert_eq!(map.len(), 3);

        let users = map.with_name("User.java");
        assert_eq!(users.len(), 2);
        assert!(users.contains(&"src/deep/User.java".to_string()));
    }

    #[test]
    fn test_probe_returns_first_hit() {
        let map = FileMap::new(["src/helper.js".to_string()]);
        let candidates = vec![
            "src/helper".to_string(),
            "src/helper.ts".to_string(),
            "src/helper.js".to_string(),
        ];
        assert_eq!(map.probe(&candidates), Some("src/helper.js"));
        assert_eq!(map.probe(&["nope".to_string()]), None);
    }
}
