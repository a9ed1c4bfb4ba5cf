use std::path::Path;

use anyhow::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};

/// Top-level configuration from `.strata.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub batching: BatchingConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
}

/// Directory names never descended into, at any depth.
pub const IGNORED_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "build",
    "out",
    ".vscode",
    ".idea",
    "__pycache__",
    "venv",
    ".env",
    "coverage",
    ".nyc_output",
    ".cache",
    "tmp",
    "temp",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Directory names to skip. Defaults to the authoritative ignore set.
    #[serde(default = "default_ignore_dirs")]
    pub ignore_dirs: Vec<String>,
    /// Additional glob patterns (matched against relative paths) to exclude.
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

fn default_ignore_dirs() -> Vec<String> {
    IGNORED_DIRS.iter().map(|s| s.to_string()).collect()
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            ignore_dirs: default_ignore_dirs(),
            exclude_patterns: Vec::new(),
        }
    }
}

impl ScanConfig {
    /// Compile the user exclude patterns. Invalid patterns are skipped.
    pub fn exclude_set(&self) -> GlobSet {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.exclude_patterns {
            if let Ok(glob) = Glob::new(pattern) {
                builder.add(glob);
            }
        }
        builder
            .build()
            .unwrap_or_else(|_| GlobSetBuilder::new().build().unwrap())
    }
}

/// Bounded fan-out sizes. Keeps open file handles and peak memory
/// predictable on large trees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchingConfig {
    #[serde(default = "default_directory_batch")]
    pub directory_batch_size: usize,
    #[serde(default = "default_file_batch")]
    pub file_batch_size: usize,
}

fn default_directory_batch() -> usize {
    10
}

fn default_file_batch() -> usize {
    20
}

impl Default for BatchingConfig {
    fn default() -> Self {
        Self {
            directory_batch_size: default_directory_batch(),
            file_batch_size: default_file_batch(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Heap usage above this emits a memory warning at each milestone.
    #[serde(default = "default_memory_warn_mb")]
    pub memory_warn_mb: u64,
    /// Total analysis time above this emits a performance warning.
    #[serde(default = "default_slow_warn_secs")]
    pub slow_analysis_warn_secs: u64,
}

fn default_memory_warn_mb() -> u64 {
    500
}

fn default_slow_warn_secs() -> u64 {
    30
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            memory_warn_mb: default_memory_warn_mb(),
            slow_analysis_warn_secs: default_slow_warn_secs(),
        }
    }
}

impl Config {
    /// Load configuration from a `.strata.toml` file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load from `.strata.toml` in the given directory, or return defaults.
    pub fn load_or_default(dir: &Path) -> Self {
        let config_path = dir.join(".strata.toml");
        if config_path.exists() {
            Self::load(&config_path).unwrap_or_default()
        } else {
            Self::default()
        }
    }

    /// Generate default TOML content for `strata init`.
    pub fn default_toml() -> String {
        r#"# Strata - workspace analysis configuration

[scan]
# Directory names never descended into.
ignore_dirs = [
    "node_modules", ".git", "dist", "build", "out", ".vscode", ".idea",
    "__pycache__", "venv", ".env", "coverage", ".nyc_output", ".cache",
    "tmp", "temp",
]
# Additional glob patterns to exclude, matched against relative paths.
exclude_patterns = []

[batching]
# Directory entries processed concurrently per batch.
directory_batch_size = 10
# File contents read concurrently per batch.
file_batch_size = 20

[limits]
memory_warn_mb = 500
slow_analysis_warn_secs = 30
"#
        .to_string()
    }
}
