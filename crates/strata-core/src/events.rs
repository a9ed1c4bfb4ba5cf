use serde::{Deserialize, Serialize};

use crate::error::ErrorKind;

/// Analysis milestones reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProgressStage {
    ScanStart,
    ScanDone,
    DepsStart,
    DepsDone,
    Done,
}

/// Structured progress notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub stage: ProgressStage,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent: Option<u8>,
}

impl ProgressEvent {
    pub fn new(stage: ProgressStage, message: impl Into<String>, percent: Option<u8>) -> Self {
        Self {
            stage,
            message: message.into(),
            percent,
        }
    }
}

/// Structured error notification for the host boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEvent {
    pub kind: ErrorKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub cause: String,
    pub suggestion: String,
}

/// Seam between the engine and whatever hosts it (editor, CLI, tests).
///
/// The engine never performs editor actions itself; it reports progress
/// and terminal errors here. Implementations must be cheap and must not
/// block.
pub trait HostAdapter: Send + Sync {
    fn progress(&self, event: &ProgressEvent);
    fn error(&self, event: &ErrorEvent);
}

/// Host that ignores everything. Default for library use.
#[derive(Debug, Default)]
pub struct NullHost;

impl HostAdapter for NullHost {
    fn progress(&self, _event: &ProgressEvent) {}
    fn error(&self, _event: &ErrorEvent) {}
}

/// One structured log entry handed to the injected sink.
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl LogRecord {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
            kind: None,
            context: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_kind(mut self, kind: ErrorKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

/// Injected logging sink. The engine has no global logger.
pub trait LogSink: Send + Sync {
    fn debug(&self, record: LogRecord);
    fn info(&self, record: LogRecord);
    fn warn(&self, record: LogRecord);
    fn error(&self, record: LogRecord);
}

/// Production sink backed by `tracing`.
#[derive(Debug, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn debug(&self, record: LogRecord) {
        let kind = record.kind.map(|k| k.to_string());
        tracing::debug!(
            path = record.path.as_deref(),
            kind = kind.as_deref(),
            context = record.context.as_deref(),
            "{}",
            record.message
        );
    }

    fn info(&self, record: LogRecord) {
        let kind = record.kind.map(|k| k.to_string());
        tracing::info!(
            path = record.path.as_deref(),
            kind = kind.as_deref(),
            context = record.context.as_deref(),
            "{}",
            record.message
        );
    }

    fn warn(&self, record: LogRecord) {
        let kind = record.kind.map(|k| k.to_string());
        tracing::warn!(
            path = record.path.as_deref(),
            kind = kind.as_deref(),
            context = record.context.as_deref(),
            "{}",
            record.message
        );
    }

    fn error(&self, record: LogRecord) {
        let kind = record.kind.map(|k| k.to_string());
        tracing::error!(
            path = record.path.as_deref(),
            kind = kind.as_deref(),
            context = record.context.as_deref(),
            "{}",
            record.message
        );
    }
}

/// Sink that drops everything. Useful in tests asserting pure outputs.
#[derive(Debug, Default)]
pub struct NullSink;

impl LogSink for NullSink {
    fn debug(&self, _record: LogRecord) {}
    fn info(&self, _record: LogRecord) {}
    fn warn(&self, _record: LogRecord) {}
    fn error(&self, _record: LogRecord) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_serde_names() {
        assert_eq!(
            serde_json::to_string(&ProgressStage::ScanStart).unwrap(),
            "\"scan-start\""
        );
        assert_eq!(
            serde_json::to_string(&ProgressStage::DepsDone).unwrap(),
            "\"deps-done\""
        );
        assert_eq!(
            serde_json::to_string(&ProgressStage::Done).unwrap(),
            "\"done\""
        );
    }

    #[test]
    fn test_progress_event_omits_missing_percent() {
        let event = ProgressEvent::new(ProgressStage::ScanStart, "scanning", None);
        let value = serde_json::to_value(&event).unwrap();
        assert!(value.get("percent").is_none());
    }

    #[test]
    fn test_log_record_builder() {
        let record = LogRecord::new("boom")
            .with_path("src/a.ts")
            .with_kind(ErrorKind::Analysis);
        assert_eq!(record.path.as_deref(), Some("src/a.ts"));
        assert_eq!(record.kind, Some(ErrorKind::Analysis));
    }
}
