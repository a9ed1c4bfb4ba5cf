//! PHP: `include`/`require` and their `_once` variants with a relative
//! string argument.

use std::sync::OnceLock;

use regex::Regex;

use strata_core::{Dependency, DependencyExtractor, DependencyKind, FileMap, Node, SourceFile};

use crate::resolve::probe_relative;

fn regex_include() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?:include|require)(?:_once)?\s*\(?\s*['"]([^'"]+)['"]"#)
            .expect("valid regex literal")
    })
}

pub struct PhpExtractor;

impl DependencyExtractor for PhpExtractor {
    fn name(&self) -> &'static str {
        "php"
    }

    fn extensions(&self) -> Option<&[&'static str]> {
        Some(&[".php"])
    }

    fn extract(&self, file: &SourceFile, files: &FileMap) -> Vec<Dependency> {
        let mut edges = Vec::new();
        for caps in regex_include().captures_iter(&file.content) {
            let spec = &caps[1];
            if !spec.contains("./") && !spec.contains("../") {
                continue;
            }
            if let Ok(hit) = probe_relative(file, spec, files) {
                edges.push(Dependency::new(
                    file.path.clone(),
                    Node::Project(hit),
                    DependencyKind::Include,
                ));
            }
        }
        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(path: &str, content: &str) -> SourceFile {
        SourceFile {
            path: path.to_string(),
            extension: ".php".to_string(),
            content: content.to_string(),
        }
    }

    fn map(paths: &[&str]) -> FileMap {
        FileMap::new(paths.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_require_once_with_parens() {
        let files = map(&["src/config.php", "src/index.php"]);
        let file = source("src/index.php", "<?php require_once('./config.php'); ?>");
        let edges = PhpExtractor.extract(&file, &files);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].to, Node::Project("src/config.php".to_string()));
        assert_eq!(edges[0].kind, DependencyKind::Include);
    }

    #[test]
    fn test_include_without_parens() {
        let files = map(&["lib/db.php", "public/page.php"]);
        let file = source("public/page.php", "<?php include '../lib/db.php'; ?>");
        let edges = PhpExtractor.extract(&file, &files);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].to, Node::Project("lib/db.php".to_string()));
    }

    #[test]
    fn test_non_relative_include_skipped() {
        let files = map(&["vendor.php", "src/index.php"]);
        let file = source("src/index.php", "<?php require 'vendor.php'; ?>");
        assert!(PhpExtractor.extract(&file, &files).is_empty());
    }
}
