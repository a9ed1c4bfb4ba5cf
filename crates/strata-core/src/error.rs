use std::fmt;
use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable kind tags for errors and informational warnings, shared by the
/// error type, log records, and host error events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    FileRead,
    DirectoryRead,
    Analysis,
    FileSave,
    Webview,
    MemoryWarning,
    PerformanceWarning,
    CircularDependency,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::FileRead => "file-read",
            ErrorKind::DirectoryRead => "directory-read",
            ErrorKind::Analysis => "analysis",
            ErrorKind::FileSave => "file-save",
            ErrorKind::Webview => "webview",
            ErrorKind::MemoryWarning => "memory-warning",
            ErrorKind::PerformanceWarning => "performance-warning",
            ErrorKind::CircularDependency => "circular-dependency",
        };
        write!(f, "{s}")
    }
}

/// Failures surfaced by the analysis engine.
///
/// Only root-level failures reach the caller; everything else is recovered
/// locally and logged through the injected sink.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("failed to read file {path}")]
    FileRead {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to read directory {path}")]
    DirectoryRead {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("analysis failed for {path}: {message}")]
    Analysis { path: String, message: String },

    #[error("failed to save file {path}")]
    FileSave {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("host boundary failure: {message}")]
    Host { message: String },
}

impl AnalyzerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalyzerError::FileRead { .. } => ErrorKind::FileRead,
            AnalyzerError::DirectoryRead { .. } => ErrorKind::DirectoryRead,
            AnalyzerError::Analysis { .. } => ErrorKind::Analysis,
            AnalyzerError::FileSave { .. } => ErrorKind::FileSave,
            AnalyzerError::Host { .. } => ErrorKind::Webview,
        }
    }

    pub fn path(&self) -> Option<&str> {
        match self {
            AnalyzerError::FileRead { path, .. }
            | AnalyzerError::DirectoryRead { path, .. }
            | AnalyzerError::Analysis { path, .. }
            | AnalyzerError::FileSave { path, .. } => Some(path),
            AnalyzerError::Host { .. } => None,
        }
    }

    /// Actionable hint attached to host-facing error events.
    pub fn suggestion(&self) -> &'static str {
        match self {
            AnalyzerError::FileRead { .. } => {
                "check that the file exists and is readable by the current user"
            }
            AnalyzerError::DirectoryRead { .. } => {
                "check that the directory exists and permissions allow listing it"
            }
            AnalyzerError::Analysis { .. } => {
                "the file is skipped; inspect it for unusual encoding or size"
            }
            AnalyzerError::FileSave { .. } => {
                "check free disk space and write permissions on the target path"
            }
            AnalyzerError::Host { .. } => "retry the host operation; the analysis itself is intact",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn io_err() -> io::Error {
        io::Error::new(io::ErrorKind::PermissionDenied, "denied")
    }

    #[test]
    fn test_kind_mapping() {
        let e = AnalyzerError::DirectoryRead {
            path: "src".into(),
            source: io_err(),
        };
        assert_eq!(e.kind(), ErrorKind::DirectoryRead);
        assert_eq!(e.path(), Some("src"));
    }

    #[test]
    fn test_suggestion_is_nonempty_for_all_variants() {
        let variants = vec![
            AnalyzerError::FileRead {
                path: "a".into(),
                source: io_err(),
            },
            AnalyzerError::DirectoryRead {
                path: "b".into(),
                source: io_err(),
            },
            AnalyzerError::Analysis {
                path: "c".into(),
                message: "bad".into(),
            },
            AnalyzerError::FileSave {
                path: "d".into(),
                source: io_err(),
            },
            AnalyzerError::Host {
                message: "gone".into(),
            },
        ];
        for v in variants {
            assert!(!v.suggestion().is_empty());
        }
    }

    #[test]
    fn test_kind_serde_kebab_case() {
        assert_eq!(
            serde_json::to_string(&ErrorKind::MemoryWarning).unwrap(),
            "\"memory-warning\""
        );
    }
}
