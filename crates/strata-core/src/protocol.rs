//! Host ↔ engine message protocol. Both directions are closed tagged
//! enums; each variant carries only the fields its command needs, so an
//! embedder never handles an untyped payload.

use serde::{Deserialize, Serialize};

use crate::types::ProjectStructure;

/// Export targets the host side understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Binary, base64 payload.
    Png,
    /// UTF-8 text.
    Json,
    /// UTF-8 text.
    Html,
}

/// Renderer → engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum HostCommand {
    GetFileContent {
        path: String,
    },
    SaveFileContent {
        path: String,
        content: String,
    },
    OpenFile {
        path: String,
    },
    Export {
        format: ExportFormat,
        payload: String,
    },
}

/// Engine → renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum HostReply {
    LoadData {
        structure: Box<ProjectStructure>,
    },
    FileContent {
        path: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
}
