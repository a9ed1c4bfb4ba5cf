//! JavaScript/TypeScript family: static imports (named, namespace,
//! default, bare), `require(...)`, dynamic `import(...)`, and
//! `export ... from` re-exports.

use std::sync::OnceLock;

use regex::Regex;

use strata_core::{Dependency, DependencyExtractor, DependencyKind, FileMap, Node, SourceFile};

use crate::resolve::{is_relative_spec, probe_relative};

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid regex literal")
}

fn regex_static_import() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // import defaultName from '...', import * as ns from '...',
    // import { a, b as c } from '...', with optional `type` qualifier.
    RE.get_or_init(|| {
        regex(r#"(?m)^\s*import\s+(?:type\s+)?[\w$]*\s*,?\s*(?:\*\s+as\s+[\w$]+|\{[^}]*\})?\s*from\s+['"]([^'"]+)['"]"#)
    })
}

fn regex_bare_import() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // import './side-effect';
    RE.get_or_init(|| regex(r#"(?m)^\s*import\s+['"]([^'"]+)['"]"#))
}

fn regex_require() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"require\s*\(\s*['"]([^'"]+)['"]\s*\)"#))
}

fn regex_dynamic_import() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"import\s*\(\s*['"]([^'"]+)['"]\s*\)"#))
}

fn regex_export_from() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // export * from '...', export { a } from '...'
    RE.get_or_init(|| {
        regex(r#"(?m)^\s*export\s+(?:type\s+)?(?:\*(?:\s+as\s+[\w$]+)?|\{[^}]*\})\s+from\s+['"]([^'"]+)['"]"#)
    })
}

pub struct JavaScriptExtractor;

impl JavaScriptExtractor {
    fn edge(&self, file: &SourceFile, spec: &str, kind: DependencyKind, files: &FileMap) -> Dependency {
        let to = if is_relative_spec(spec) {
            match probe_relative(file, spec, files) {
                Ok(hit) => Node::Project(hit),
                Err(resolved) => Node::Missing(resolved),
            }
        } else {
            Node::External(spec.to_string())
        };
        Dependency::new(file.path.clone(), to, kind)
    }
}

impl DependencyExtractor for JavaScriptExtractor {
    fn name(&self) -> &'static str {
        "javascript"
    }

    fn extensions(&self) -> Option<&[&'static str]> {
        Some(&[".js", ".jsx", ".ts", ".tsx", ".mjs", ".cjs"])
    }

    fn extract(&self, file: &SourceFile, files: &FileMap) -> Vec<Dependency> {
        let mut edges = Vec::new();

        let import_patterns = [
            regex_static_import(),
            regex_bare_import(),
            regex_require(),
            regex_dynamic_import(),
        ];
        for pattern in import_patterns {
            for caps in pattern.captures_iter(&file.content) {
                edges.push(self.edge(file, &caps[1], DependencyKind::Import, files));
            }
        }

        for caps in regex_export_from().captures_iter(&file.content) {
            edges.push(self.edge(file, &caps[1], DependencyKind::Export, files));
        }

        edges
    }
}
