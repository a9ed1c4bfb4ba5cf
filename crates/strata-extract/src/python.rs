//! Python: `from X import ...` and `import X`. Only relative (dotted)
//! modules resolve to project files; absolute imports are package
//! references and are not emitted.

use std::sync::OnceLock;

use regex::Regex;

use strata_core::path::{extension_variants, resolve_python_dotted};
use strata_core::{Dependency, DependencyExtractor, DependencyKind, FileMap, Node, SourceFile};

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid regex literal")
}

fn regex_from_import() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"(?m)^\s*from\s+([\w.]+)\s+import\s"#))
}

fn regex_plain_import() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"(?m)^\s*import\s+([\w.]+(?:\s*,\s*[\w.]+)*)"#))
}

pub struct PythonExtractor;

impl PythonExtractor {
    fn resolve(&self, file: &SourceFile, module: &str, files: &FileMap) -> Option<Node> {
        if !module.starts_with('.') {
            return None;
        }
        let resolved = resolve_python_dotted(&file.path, module);
        let variants = extension_variants(&resolved);
        files.probe(&variants).map(|hit| Node::Project(hit.to_string()))
    }
}

impl DependencyExtractor for PythonExtractor {
    fn name(&self) -> &'static str {
        "python"
    }

    fn extensions(&self) -> Option<&[&'static str]> {
        Some(&[".py"])
    }

    fn extract(&self, file: &SourceFile, files: &FileMap) -> Vec<Dependency> {
        let mut edges = Vec::new();

        for caps in regex_from_import().captures_iter(&file.content) {
            if let Some(to) = self.resolve(file, &caps[1], files) {
                edges.push(Dependency::new(file.path.clone(), to, DependencyKind::Import));
            }
        }

        for caps in regex_plain_import().captures_iter(&file.content) {
            for module in caps[1].split(',') {
                if let Some(to) = self.resolve(file, module.trim(), files) {
                    edges.push(Dependency::new(file.path.clone(), to, DependencyKind::Import));
                }
            }
        }

        edges
    }
}
