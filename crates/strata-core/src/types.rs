use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Architectural layer. Every analyzed file lands in exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    Presentation,
    Business,
    Data,
    Utils,
    Config,
}

impl Layer {
    pub const ALL: [Layer; 5] = [
        Layer::Presentation,
        Layer::Business,
        Layer::Data,
        Layer::Utils,
        Layer::Config,
    ];
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layer::Presentation => write!(f, "presentation"),
            Layer::Business => write!(f, "business"),
            Layer::Data => write!(f, "data"),
            Layer::Utils => write!(f, "utils"),
            Layer::Config => write!(f, "config"),
        }
    }
}

/// Closed set of language/type tags assigned by the file classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    JavaScript,
    TypeScript,
    React,
    Vue,
    Svelte,
    Astro,
    Html,
    Css,
    Php,
    Python,
    Java,
    CSharp,
    Cpp,
    C,
    Go,
    Rust,
    Ruby,
    Swift,
    Kotlin,
    Scala,
    Sql,
    GraphQL,
    Json,
    Xml,
    Yaml,
    Toml,
    Ini,
    Env,
    Properties,
    Config,
    Markdown,
    Text,
    Shell,
    PowerShell,
    Batch,
    R,
    Matlab,
    Dart,
    Lua,
    Perl,
    Elixir,
    Directory,
    Unknown,
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        write!(f, "{}", s.trim_matches('"'))
    }
}

/// Target of a dependency edge.
///
/// Serializes to the renderer's marker strings (`[External] name`,
/// `[Missing] path`, `[DB:kind]`, bare path for project files) and parses
/// back from them, so the JSON stays wire-compatible while the core works
/// with typed variants.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Node {
    /// Workspace-relative path of a real project file.
    Project(String),
    /// Package or module outside the workspace.
    External(String),
    /// Relative import that resolved to nothing in the file map.
    Missing(String),
    /// Database connection sink, by engine kind.
    Database(String),
}

impl Node {
    pub fn parse(s: &str) -> Node {
        if let Some(rest) = s.strip_prefix("[External] ") {
            Node::External(rest.to_string())
        } else if let Some(rest) = s.strip_prefix("[Missing] ") {
            Node::Missing(rest.to_string())
        } else if let Some(rest) = s.strip_prefix("[DB:") {
            match rest.strip_suffix(']') {
                Some(kind) => Node::Database(kind.to_string()),
                None => Node::Project(s.to_string()),
            }
        } else {
            Node::Project(s.to_string())
        }
    }

    pub fn is_project(&self) -> bool {
        matches!(self, Node::Project(_))
    }

    /// Project path, if this is a project node.
    pub fn as_project(&self) -> Option<&str> {
        match self {
            Node::Project(p) => Some(p),
            _ => None,
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Project(p) => write!(f, "{p}"),
            Node::External(n) => write!(f, "[External] {n}"),
            Node::Missing(p) => write!(f, "[Missing] {p}"),
            Node::Database(k) => write!(f, "[DB:{k}]"),
        }
    }
}

impl Serialize for Node {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Node::parse(&s))
    }
}

/// Kind of dependency relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    Import,
    Export,
    Inheritance,
    Include,
    Script,
    Stylesheet,
    Database,
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DependencyKind::Import => write!(f, "import"),
            DependencyKind::Export => write!(f, "export"),
            DependencyKind::Inheritance => write!(f, "inheritance"),
            DependencyKind::Include => write!(f, "include"),
            DependencyKind::Script => write!(f, "script"),
            DependencyKind::Stylesheet => write!(f, "stylesheet"),
            DependencyKind::Database => write!(f, "database"),
        }
    }
}

/// A directed, kinded edge between two nodes. The `(from, to, kind)`
/// triple is unique within a `ProjectStructure`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dependency {
    pub from: String,
    pub to: Node,
    pub kind: DependencyKind,
}

impl Dependency {
    pub fn new(from: impl Into<String>, to: Node, kind: DependencyKind) -> Self {
        Self {
            from: from.into(),
            to,
            kind,
        }
    }
}

/// A file or directory in the scanned tree.
///
/// Paths are workspace-relative with forward slashes; `full_path` keeps
/// the absolute form for I/O only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileNode {
    pub path: String,
    pub full_path: String,
    pub name: String,
    /// Lowercase, with leading dot; empty for directories and extensionless files.
    pub extension: String,
    pub size: u64,
    pub type_tag: FileType,
    pub last_modified: DateTime<Utc>,
    pub is_directory: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<FileNode>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub functions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variables: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_used: bool,
    pub reference_count: usize,
}

impl FileNode {
    pub fn file(
        path: String,
        full_path: String,
        name: String,
        extension: String,
        size: u64,
        type_tag: FileType,
        last_modified: DateTime<Utc>,
    ) -> Self {
        Self {
            path,
            full_path,
            name,
            extension,
            size,
            type_tag,
            last_modified,
            is_directory: false,
            children: None,
            comments: Vec::new(),
            functions: Vec::new(),
            variables: Vec::new(),
            classes: Vec::new(),
            description: None,
            is_used: true,
            reference_count: 0,
        }
    }

    pub fn directory(
        path: String,
        full_path: String,
        name: String,
        last_modified: DateTime<Utc>,
        children: Vec<FileNode>,
    ) -> Self {
        Self {
            path,
            full_path,
            name,
            extension: String::new(),
            size: 0,
            type_tag: FileType::Directory,
            last_modified,
            is_directory: true,
            children: Some(children),
            comments: Vec::new(),
            functions: Vec::new(),
            variables: Vec::new(),
            classes: Vec::new(),
            description: None,
            is_used: true,
            reference_count: 0,
        }
    }
}

/// Layer name → file paths. The five layers partition `files[]`.
pub type LayerMap = BTreeMap<Layer, Vec<String>>;

/// One enumerated cycle: the ordered node sequence starting at the first
/// revisited node, plus the canonical unordered key used for dedup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cycle {
    pub nodes: Vec<String>,
    pub key: String,
}

/// Incoming/outgoing edge counts for a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FanMetrics {
    pub fan_in: usize,
    pub fan_out: usize,
}

/// Derived graph analyses, computed once per run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphMetrics {
    pub cycles: Vec<Cycle>,
    pub critical_path: Vec<String>,
    pub coupling: usize,
    pub average_coupling: f64,
    pub fan: BTreeMap<String, FanMetrics>,
}

/// Aggregate totals, recomputed on each analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    pub total_files: usize,
    pub total_size: u64,
    pub total_dependencies: usize,
    pub files_by_type: BTreeMap<FileType, usize>,
    pub average_file_size: f64,
    pub average_dependencies: f64,
    /// Percentage of edges that resolve to a project file.
    pub dependency_ratio: f64,
}

/// Complete analysis output handed to consumers as an immutable value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStructure {
    pub root_path: String,
    /// Flattened supported files, in tree order.
    pub files: Vec<FileNode>,
    pub file_tree: Vec<FileNode>,
    pub dependencies: Vec<Dependency>,
    pub layers: LayerMap,
    pub stats: ProjectStats,
    pub metrics: GraphMetrics,
}

impl ProjectStructure {
    /// Empty result with zeroed stats, used when the root is unreadable.
    pub fn empty(root_path: impl Into<String>) -> Self {
        Self {
            root_path: root_path.into(),
            files: Vec::new(),
            file_tree: Vec::new(),
            dependencies: Vec::new(),
            layers: LayerMap::new(),
            stats: ProjectStats::default(),
            metrics: GraphMetrics::default(),
        }
    }
}
