//! Shared resolution helpers for the extractors.

use strata_core::path::{extension_variants, resolve_relative};
use strata_core::{FileMap, SourceFile};

/// Resolve `spec` against the importing file and probe the extension
/// variants against the frozen file map. `Ok` carries the matched project
/// path; `Err` carries the resolved-but-absent path.
pub(crate) fn probe_relative(
    file: &SourceFile,
    spec: &str,
    files: &FileMap,
) -> Result<String, String> {
    let resolved = resolve_relative(&file.path, spec);
    let variants = extension_variants(&resolved);
    match files.probe(&variants) {
        Some(hit) => Ok(hit.to_string()),
        None => Err(resolved),
    }
}

/// Specifiers that point into the workspace rather than at a package.
pub(crate) fn is_relative_spec(spec: &str) -> bool {
    spec.starts_with('.') || spec.starts_with('/')
}

/// URLs the CSS/HTML extractors must skip.
pub(crate) fn is_absolute_url(spec: &str) -> bool {
    spec.starts_with("http") || spec.starts_with("//")
}
