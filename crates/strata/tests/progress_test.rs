//! Host-boundary behavior: progress milestones, cancellation, terminal
//! error notification.

use std::fs;
use std::sync::{Arc, Mutex};

use tokio_util::sync::CancellationToken;

use strata_core::events::{ErrorEvent, HostAdapter, ProgressEvent, ProgressStage};
use strata_core::pipeline::{AnalysisOutcome, ProjectAnalyzer};
use strata_core::{Config, ErrorKind};
use strata_extract::{default_annotators, default_extractors};

#[derive(Default)]
struct RecordingHost {
    progress: Mutex<Vec<ProgressEvent>>,
    errors: Mutex<Vec<ErrorEvent>>,
}

impl HostAdapter for RecordingHost {
    fn progress(&self, event: &ProgressEvent) {
        self.progress.lock().unwrap().push(event.clone());
    }

    fn error(&self, event: &ErrorEvent) {
        self.errors.lock().unwrap().push(event.clone());
    }
}

fn analyzer(host: Arc<RecordingHost>) -> ProjectAnalyzer {
    ProjectAnalyzer::new(
        Config::default(),
        default_extractors(),
        default_annotators(),
    )
    .with_host(host)
}

#[tokio::test]
async fn test_milestones_fire_in_order_with_percentages() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.ts"), "import './b';\n").unwrap();
    fs::write(dir.path().join("b.ts"), "export {}\n").unwrap();

    let host = Arc::new(RecordingHost::default());
    analyzer(host.clone()).analyze(dir.path()).await.unwrap();

    let events = host.progress.lock().unwrap().clone();
    let stages: Vec<ProgressStage> = events.iter().map(|e| e.stage).collect();
    assert_eq!(
        stages,
        vec![
            ProgressStage::ScanStart,
            ProgressStage::ScanDone,
            ProgressStage::DepsStart,
            ProgressStage::DepsDone,
            ProgressStage::Done,
        ]
    );

    let percents: Vec<u8> = events.iter().filter_map(|e| e.percent).collect();
    assert_eq!(percents.first(), Some(&0));
    assert_eq!(percents.last(), Some(&100));
    assert!(percents.windows(2).all(|w| w[0] <= w[1]));
}

#[tokio::test]
async fn test_cancellation_is_distinct_from_success_and_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.ts"), "export {}\n").unwrap();

    let token = CancellationToken::new();
    token.cancel();
    let analyzer = ProjectAnalyzer::new(
        Config::default(),
        default_extractors(),
        default_annotators(),
    )
    .with_cancellation(token);

    let outcome = analyzer.analyze(dir.path()).await.unwrap();
    assert!(matches!(outcome, AnalysisOutcome::Cancelled));
    assert!(outcome.into_structure().is_none());
}

#[tokio::test]
async fn test_terminal_failure_notifies_host_once() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("not-there");

    let host = Arc::new(RecordingHost::default());
    let result = analyzer(host.clone()).analyze(&missing).await;

    assert!(result.is_err());
    let errors = host.errors.lock().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ErrorKind::DirectoryRead);
    assert!(errors[0].path.is_some());
    assert!(!errors[0].cause.is_empty());
    assert!(!errors[0].suggestion.is_empty());
}

#[tokio::test]
async fn test_unreadable_file_recovers_with_zero_edges() {
    let dir = tempfile::tempdir().unwrap();
    // A directory masquerading as nothing readable: the scanner lists it,
    // but a supported file that disappears between scan and read must not
    // abort the run. Simulate with a dangling symlink.
    fs::write(dir.path().join("ok.ts"), "import './ok2';\n").unwrap();
    fs::write(dir.path().join("ok2.ts"), "export {}\n").unwrap();
    #[cfg(unix)]
    std::os::unix::fs::symlink(dir.path().join("gone.ts"), dir.path().join("broken.ts")).unwrap();

    let host = Arc::new(RecordingHost::default());
    let outcome = analyzer(host.clone()).analyze(dir.path()).await.unwrap();
    let structure = outcome.into_structure().unwrap();

    // The healthy files still analyzed end to end.
    assert!(structure.files.iter().any(|f| f.path == "ok.ts"));
    assert_eq!(structure.dependencies.len(), 1);
    // Terminal error channel stays quiet for recoverable failures.
    assert!(host.errors.lock().unwrap().is_empty());
}
