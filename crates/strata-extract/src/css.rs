//! CSS family: `@import "..."` and `@import url(...)`. Remote URLs are
//! skipped.

use std::sync::OnceLock;

use regex::Regex;

use strata_core::{Dependency, DependencyExtractor, DependencyKind, FileMap, Node, SourceFile};

use crate::resolve::{is_absolute_url, probe_relative};

fn regex_import() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // @import "x.css";  @import url("x.css");  @import url(x.css);
    RE.get_or_init(|| {
        Regex::new(r#"@import\s+(?:url\(\s*)?['"]?([^'"()\s;]+)['"]?\s*\)?"#)
            .expect("valid regex literal")
    })
}

pub struct CssExtractor;

impl DependencyExtractor for CssExtractor {
    fn name(&self) -> &'static str {
        "css"
    }

    fn extensions(&self) -> Option<&[&'static str]> {
        Some(&[".css", ".scss", ".sass", ".less"])
    }

    fn extract(&self, file: &SourceFile, files: &FileMap) -> Vec<Dependency> {
        let mut edges = Vec::new();
        for caps in regex_import().captures_iter(&file.content) {
            let spec = &caps[1];
            if is_absolute_url(spec) {
                continue;
            }
            if let Ok(hit) = probe_relative(file, spec, files) {
                edges.push(Dependency::new(
                    file.path.clone(),
                    Node::Project(hit),
                    DependencyKind::Import,
                ));
            }
        }
        edges
    }
}
