//! Pure path arithmetic over workspace-relative, forward-slash paths.
//! No I/O happens here; existence checks are the caller's job.

/// Extensions probed, in order, when a specifier has no extension.
const FILE_VARIANTS: &[&str] = &[
    "ts", "js", "tsx", "jsx", "py", "java", "go", "php", "html", "htm", "css", "scss", "sql",
];

/// Extensions probed for `<base>/index.<ext>` module resolution.
const INDEX_VARIANTS: &[&str] = &["ts", "js", "tsx", "jsx", "php", "html"];

/// Resolve `spec` against the directory of `from_file` and normalize.
///
/// A leading `/` is interpreted as workspace-root relative. `..` segments
/// never climb above the workspace root.
pub fn resolve_relative(from_file: &str, spec: &str) -> String {
    let spec = spec.replace('\\', "/");
    let base = if let Some(stripped) = spec.strip_prefix('/') {
        return normalize(stripped);
    } else {
        parent_dir(from_file)
    };

    if base.is_empty() {
        normalize(&spec)
    } else {
        normalize(&format!("{base}/{spec}"))
    }
}

/// Resolve a Python relative dotted module (`.utils.helpers`) against the
/// directory of `from_file`. Exactly one leading dot is stripped; the
/// remaining dots separate path segments.
pub fn resolve_python_dotted(from_file: &str, dotted: &str) -> String {
    let rest = dotted.strip_prefix('.').unwrap_or(dotted);
    let segments: Vec<&str> = rest.split('.').filter(|s| !s.is_empty()).collect();
    let base = parent_dir(from_file);

    let joined = segments.join("/");
    if base.is_empty() {
        normalize(&joined)
    } else if joined.is_empty() {
        normalize(&base)
    } else {
        normalize(&format!("{base}/{joined}"))
    }
}

/// Candidate paths for an extensionless specifier, in probe order: the bare
/// path, then `<base>.<ext>` for the file variant set, then
/// `<base>/index.<ext>` for the index variant set. The first candidate
/// present in the file map wins. A specifier that already has an extension
/// yields only itself.
pub fn extension_variants(base_path: &str) -> Vec<String> {
    if has_extension(base_path) {
        return vec![base_path.to_string()];
    }

    let mut variants = Vec::with_capacity(1 + FILE_VARIANTS.len() + INDEX_VARIANTS.len());
    variants.push(base_path.to_string());
    for ext in FILE_VARIANTS {
        variants.push(format!("{base_path}.{ext}"));
    }
    for ext in INDEX_VARIANTS {
        variants.push(format!("{base_path}/index.{ext}"));
    }
    variants
}

/// Collapse `.` and `..` segments and drop redundant slashes.
pub fn normalize(path: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                out.pop();
            }
            s => out.push(s),
        }
    }
    out.join("/")
}

/// Directory part of a relative path, empty for top-level files.
pub fn parent_dir(path: &str) -> String {
    match path.rfind('/') {
        Some(idx) => path[..idx].to_string(),
        None => String::new(),
    }
}

fn has_extension(path: &str) -> bool {
    let name = match path.rfind('/') {
        Some(idx) => &path[idx + 1..],
        None => path,
    };
    match name.rfind('.') {
        Some(0) | None => false,
        Some(_) => true,
    }
}
