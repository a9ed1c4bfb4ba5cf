//! Deterministic layer assignment. First match in the cascade wins, so
//! every file lands in exactly one layer and reordering the checks would
//! change the partition.

use crate::types::{FileNode, Layer};

const PRESENTATION_HINTS: &[&str] = &[
    "view", "component", "ui", "page", "screen", "widget", "template", "layout",
];
const PRESENTATION_EXTENSIONS: &[&str] = &[
    ".vue", ".svelte", ".tsx", ".jsx", ".html", ".htm", ".css", ".scss", ".sass", ".less",
];

const BUSINESS_HINTS: &[&str] = &[
    "service",
    "business",
    "controller",
    "handler",
    "manager",
    "provider",
    "api",
    "route",
    "endpoint",
    "middleware",
];

const DATA_HINTS: &[&str] = &[
    "model",
    "data",
    "repository",
    "entity",
    "schema",
    "database",
    "migration",
    "seed",
];
const DATA_EXTENSIONS: &[&str] = &[".sql", ".graphql", ".gql"];

const UTILS_HINTS: &[&str] = &[
    "util", "helper", "common", "shared", "lib", "tool", "constant", "enum",
];

const CONFIG_NAMES: &[&str] = &[
    "package.json",
    "tsconfig.json",
    "webpack.config.js",
    "babel.config.js",
    ".env",
];
const CONFIG_EXTENSIONS: &[&str] = &[
    ".env",
    ".json",
    ".yaml",
    ".yml",
    ".xml",
    ".toml",
    ".ini",
    ".properties",
    ".conf",
];

const BACKEND_EXTENSIONS: &[&str] = &[".php", ".py", ".java", ".cs", ".go", ".rs"];

/// Assign a file to its architectural layer.
pub fn assign(path: &str, name: &str, extension: &str) -> Layer {
    let path = path.to_lowercase();
    let name = name.to_lowercase();

    if PRESENTATION_HINTS.iter().any(|h| path.contains(h))
        || PRESENTATION_EXTENSIONS.contains(&extension)
    {
        return Layer::Presentation;
    }

    if BUSINESS_HINTS.iter().any(|h| path.contains(h)) {
        return Layer::Business;
    }

    if DATA_HINTS.iter().any(|h| path.contains(h)) || DATA_EXTENSIONS.contains(&extension) {
        return Layer::Data;
    }

    if UTILS_HINTS.iter().any(|h| path.contains(h)) {
        return Layer::Utils;
    }

    if path.contains("config")
        || name.contains("config")
        || CONFIG_NAMES.contains(&name.as_str())
        || CONFIG_EXTENSIONS.contains(&extension)
    {
        return Layer::Config;
    }

    if BACKEND_EXTENSIONS.contains(&extension) {
        Layer::Business
    } else {
        Layer::Utils
    }
}

/// Layer of a scanned file node.
pub fn layer_of(node: &FileNode) -> Layer {
    assign(&node.path, &node.name, &node.extension)
}
