//! Go: single-form and grouped import blocks. Only quoted paths that
//! start with `./` or `../` can land inside the workspace.

use std::sync::OnceLock;

use regex::Regex;

use strata_core::{Dependency, DependencyExtractor, DependencyKind, FileMap, Node, SourceFile};

use crate::resolve::probe_relative;

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid regex literal")
}

fn regex_single_import() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // import "pkg" or import alias "pkg"
    RE.get_or_init(|| regex(r#"(?m)^\s*import\s+(?:[\w.]+\s+)?"([^"]+)""#))
}

fn regex_import_block() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"import\s*\(([^)]*)\)"#))
}

fn regex_quoted() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#""([^"]+)""#))
}

pub struct GoExtractor;

impl GoExtractor {
    fn push_if_local(&self, file: &SourceFile, spec: &str, files: &FileMap, out: &mut Vec<Dependency>) {
        if !(spec.starts_with("./") || spec.starts_with("../")) {
            return;
        }
        if let Ok(hit) = probe_relative(file, spec, files) {
            out.push(Dependency::new(
                file.path.clone(),
                Node::Project(hit),
                DependencyKind::Import,
            ));
        }
    }
}

impl DependencyExtractor for GoExtractor {
    fn name(&self) -> &'static str {
        "go"
    }

    fn extensions(&self) -> Option<&[&'static str]> {
        Some(&[".go"])
    }

    fn extract(&self, file: &SourceFile, files: &FileMap) -> Vec<Dependency> {
        let mut edges = Vec::new();

        for caps in regex_single_import().captures_iter(&file.content) {
            self.push_if_local(file, &caps[1], files, &mut edges);
        }

        for block in regex_import_block().captures_iter(&file.content) {
            for caps in regex_quoted().captures_iter(&block[1]) {
                self.push_if_local(file, &caps[1], files, &mut edges);
            }
        }

        edges
    }
}
