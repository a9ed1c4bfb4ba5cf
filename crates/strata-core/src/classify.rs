//! Extension-based file classification. The classifier deliberately
//! recognizes more extensions than the dependency extractors handle:
//! classified-but-unextracted files still appear in the tree and the
//! layer map.

use crate::types::FileType;

/// Extensions (leading dot, lowercase) that enter dependency analysis and
/// the flattened `files[]` list.
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    ".js", ".jsx", ".ts", ".tsx", ".mjs", ".cjs", ".html", ".htm", ".css", ".scss", ".sass",
    ".less", ".vue", ".svelte", ".astro", ".php", ".py", ".java", ".cs", ".cpp", ".c", ".h",
    ".hpp", ".go", ".rs", ".rb", ".swift", ".kt", ".scala", ".sql", ".graphql", ".gql", ".json",
    ".xml", ".yaml", ".yml", ".toml", ".ini", ".env", ".properties", ".conf", ".config", ".md",
    ".mdx", ".rst", ".txt", ".sh", ".bash", ".zsh", ".ps1", ".bat", ".cmd", ".r", ".m", ".dart",
    ".lua", ".pl", ".ex", ".exs",
];

/// Map an extension (leading dot, lowercase) to its type tag.
pub fn classify(extension: &str) -> FileType {
    match extension {
        ".js" | ".mjs" | ".cjs" => FileType::JavaScript,
        ".ts" => FileType::TypeScript,
        ".jsx" | ".tsx" => FileType::React,
        ".vue" => FileType::Vue,
        ".svelte" => FileType::Svelte,
        ".astro" => FileType::Astro,
        ".html" | ".htm" => FileType::Html,
        ".css" | ".scss" | ".sass" | ".less" => FileType::Css,
        ".php" => FileType::Php,
        ".py" => FileType::Python,
        ".java" => FileType::Java,
        ".cs" => FileType::CSharp,
        ".cpp" | ".hpp" => FileType::Cpp,
        ".c" | ".h" => FileType::C,
        ".go" => FileType::Go,
        ".rs" => FileType::Rust,
        ".rb" => FileType::Ruby,
        ".swift" => FileType::Swift,
        ".kt" => FileType::Kotlin,
        ".scala" => FileType::Scala,
        ".sql" => FileType::Sql,
        ".graphql" | ".gql" => FileType::GraphQL,
        ".json" => FileType::Json,
        ".xml" => FileType::Xml,
        ".yaml" | ".yml" => FileType::Yaml,
        ".toml" => FileType::Toml,
        ".ini" => FileType::Ini,
        ".env" => FileType::Env,
        ".properties" => FileType::Properties,
        ".conf" | ".config" => FileType::Config,
        ".md" | ".mdx" => FileType::Markdown,
        ".rst" | ".txt" => FileType::Text,
        ".sh" | ".bash" | ".zsh" => FileType::Shell,
        ".ps1" => FileType::PowerShell,
        ".bat" | ".cmd" => FileType::Batch,
        ".r" => FileType::R,
        ".m" => FileType::Matlab,
        ".dart" => FileType::Dart,
        ".lua" => FileType::Lua,
        ".pl" => FileType::Perl,
        ".ex" | ".exs" => FileType::Elixir,
        _ => FileType::Unknown,
    }
}

/// Whether a file with this extension enters dependency analysis.
pub fn is_supported(extension: &str) -> bool {
    SUPPORTED_EXTENSIONS.contains(&extension)
}

/// Lowercase extension with leading dot, or empty. Dotfiles like `.env`
/// have no extension by this rule; the dot must follow at least one
/// character.
pub fn extension_of(name: &str) -> String {
    match name.rfind('.') {
        Some(0) | None => String::new(),
        Some(idx) => name[idx..].to_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_common_extensions() {
        assert_eq!(classify(".ts"), FileType::TypeScript);
        assert_eq!(classify(".tsx"), FileType::React);
        assert_eq!(classify(".py"), FileType::Python);
        assert_eq!(classify(".scss"), FileType::Css);
        assert_eq!(classify(".yml"), FileType::Yaml);
        assert_eq!(classify(".weird"), FileType::Unknown);
        assert_eq!(classify(""), FileType::Unknown);
    }

    #[test]
    fn test_every_supported_extension_classifies() {
        for ext in SUPPORTED_EXTENSIONS {
            assert_ne!(
                classify(ext),
                FileType::Unknown,
                "{ext} should have a type tag"
            );
        }
    }

    #[test]
    fn test_classifier_is_broader_than_supported_set() {
        // .rs, .swift, .kt are classified and appear in the tree, but no
        // dependency extractor handles them. Guard the surfaces against
        // drifting apart.
        for ext in [".rs", ".swift", ".kt"] {
            assert!(is_supported(ext));
            assert_ne!(classify(ext), FileType::Unknown);
        }
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("App.TSX"), ".tsx");
        assert_eq!(extension_of("Makefile"), "");
        assert_eq!(extension_of(".env"), "");
        assert_eq!(extension_of("settings.env"), ".env");
        assert_eq!(extension_of("archive.tar.gz"), ".gz");
    }
}
