//! Lexical (regex-grade) recognition of inter-file references for the
//! supported language families, plus per-file annotation (comments,
//! top-level elements) and database connection detection.
//!
//! Extractors emit at most real references: nothing here follows macros,
//! templates, or any semantic context beyond what the patterns capture.

pub mod annotate;
pub mod comments;
pub mod css;
pub mod database;
pub mod elements;
pub mod golang;
pub mod html;
pub mod java;
pub mod javascript;
pub mod php;
pub mod python;

mod resolve;

use strata_core::{DependencyExtractor, FileAnnotator};

pub use annotate::SourceAnnotator;
pub use database::DatabaseLinkExtractor;

/// The full extractor registry, in dispatch order: language extractors
/// first, then the language-agnostic database detector.
pub fn default_extractors() -> Vec<Box<dyn DependencyExtractor>> {
    vec![
        Box::new(javascript::JavaScriptExtractor),
        Box::new(python::PythonExtractor),
        Box::new(java::JavaExtractor),
        Box::new(golang::GoExtractor),
        Box::new(php::PhpExtractor),
        Box::new(css::CssExtractor),
        Box::new(html::HtmlExtractor),
        Box::new(database::DatabaseLinkExtractor),
    ]
}

pub fn default_annotators() -> Vec<Box<dyn FileAnnotator>> {
    vec![Box::new(annotate::SourceAnnotator)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::classify;

    #[test]
    fn test_every_extracted_extension_is_supported() {
        // The dependency analyzers must never handle an extension the
        // classifier would not flatten into `files[]`.
        for extractor in default_extractors() {
            let Some(extensions) = extractor.extensions() else {
                continue;
            };
            for ext in extensions {
                assert!(
                    classify::is_supported(ext),
                    "{} handles unsupported extension {ext}",
                    extractor.name()
                );
            }
        }
    }
}
