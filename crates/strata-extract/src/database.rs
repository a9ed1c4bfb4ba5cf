//! Language-agnostic detection of database connection strings. Each
//! detected engine kind emits exactly one `[DB:<kind>]` edge per file;
//! the synthetic node is materialized as a virtual component by the
//! consumer.

use std::sync::OnceLock;

use regex::Regex;

use strata_core::{Dependency, DependencyExtractor, DependencyKind, FileMap, Node, SourceFile};

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid regex literal")
}

struct EnginePattern {
    kind: &'static str,
    pattern: Regex,
}

fn engine_patterns() -> &'static [EnginePattern] {
    static PATTERNS: OnceLock<Vec<EnginePattern>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        vec![
            EnginePattern {
                kind: "mysql",
                pattern: regex(r"(?i)(?:mysql|mariadb)://|jdbc:mysql"),
            },
            EnginePattern {
                kind: "postgresql",
                pattern: regex(r"(?i)postgres(?:ql)?://|jdbc:postgresql"),
            },
            EnginePattern {
                kind: "mongodb",
                pattern: regex(r"(?i)mongodb(?:\+srv)?://"),
            },
            EnginePattern {
                kind: "redis",
                pattern: regex(r"(?i)rediss?://"),
            },
            EnginePattern {
                kind: "sqlite",
                pattern: regex(r"(?i)sqlite://|\bsqlite3?\.connect\b|\.sqlite3?\b"),
            },
        ]
    })
}

fn generic_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"(?im)^\s*(?:export\s+)?(?:DB_HOST|DATABASE_URL)\s*="#))
}

pub struct DatabaseLinkExtractor;

impl DependencyExtractor for DatabaseLinkExtractor {
    fn name(&self) -> &'static str {
        "database"
    }

    fn extensions(&self) -> Option<&[&'static str]> {
        // Connection strings can hide in any supported file.
        None
    }

    fn extract(&self, file: &SourceFile, _files: &FileMap) -> Vec<Dependency> {
        let mut edges = Vec::new();
        for engine in engine_patterns() {
            if engine.pattern.is_match(&file.content) {
                edges.push(Dependency::new(
                    file.path.clone(),
                    Node::Database(engine.kind.to_string()),
                    DependencyKind::Database,
                ));
            }
        }

        // Generic settings only count when no concrete engine matched.
        if edges.is_empty() && generic_pattern().is_match(&file.content) {
            edges.push(Dependency::new(
                file.path.clone(),
                Node::Database("generic".to_string()),
                DependencyKind::Database,
            ));
        }

        edges
    }
}
