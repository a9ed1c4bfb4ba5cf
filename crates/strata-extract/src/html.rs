//! HTML: `<script src>` and `<link href>` references to project files.
//! Absolute URLs are skipped.

use std::sync::OnceLock;

use regex::Regex;

use strata_core::{Dependency, DependencyExtractor, DependencyKind, FileMap, Node, SourceFile};

use crate::resolve::{is_absolute_url, probe_relative};

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid regex literal")
}

fn regex_script_src() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"(?is)<script[^>]*\bsrc\s*=\s*["']([^"']+)["']"#))
}

fn regex_link_href() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"(?is)<link[^>]*\bhref\s*=\s*["']([^"']+)["']"#))
}

pub struct HtmlExtractor;

impl HtmlExtractor {
    fn edge_for(
        &self,
        file: &SourceFile,
        spec: &str,
        kind: DependencyKind,
        files: &FileMap,
    ) -> Option<Dependency> {
        if is_absolute_url(spec) {
            return None;
        }
        let hit = probe_relative(file, spec, files).ok()?;
        Some(Dependency::new(file.path.clone(), Node::Project(hit), kind))
    }
}

impl DependencyExtractor for HtmlExtractor {
    fn name(&self) -> &'static str {
        "html"
    }

    fn extensions(&self) -> Option<&[&'static str]> {
        Some(&[".html", ".htm"])
    }

    fn extract(&self, file: &SourceFile, files: &FileMap) -> Vec<Dependency> {
        let mut edges = Vec::new();

        for caps in regex_script_src().captures_iter(&file.content) {
            if let Some(edge) = self.edge_for(file, &caps[1], DependencyKind::Script, files) {
                edges.push(edge);
            }
        }

        for caps in regex_link_href().captures_iter(&file.content) {
            if let Some(edge) = self.edge_for(file, &caps[1], DependencyKind::Stylesheet, files) {
                edges.push(edge);
            }
        }

        edges
    }
}
