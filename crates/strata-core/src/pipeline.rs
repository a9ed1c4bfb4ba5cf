use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use tokio_util::sync::CancellationToken;

use crate::cache::ContentCache;
use crate::config::Config;
use crate::deps::DependencyBuilder;
use crate::error::{AnalyzerError, ErrorKind};
use crate::events::{
    ErrorEvent, HostAdapter, LogRecord, LogSink, NullHost, ProgressEvent, ProgressStage,
    TracingSink,
};
use crate::extract::{DependencyExtractor, FileAnnotator, FileMap, SourceFile};
use crate::graph::DependencyGraph;
use crate::layer;
use crate::scan::{flatten_supported, Scanner};
use crate::stats::build_stats;
use crate::types::{Dependency, FileNode, Layer, LayerMap, ProjectStructure};

/// What a finished `analyze` call produced. Cancellation is distinct from
/// both success and error.
#[derive(Debug)]
pub enum AnalysisOutcome {
    Completed(ProjectStructure),
    Cancelled,
}

impl AnalysisOutcome {
    pub fn into_structure(self) -> Option<ProjectStructure> {
        match self {
            AnalysisOutcome::Completed(structure) => Some(structure),
            AnalysisOutcome::Cancelled => None,
        }
    }
}

/// Single entry point of the analysis engine.
///
/// Holds no mutable state across runs apart from the per-run content
/// cache, which is rebuilt at the start of each `analyze` call and
/// read-only afterwards.
pub struct ProjectAnalyzer {
    config: Config,
    builder: DependencyBuilder,
    host: Arc<dyn HostAdapter>,
    sink: Arc<dyn LogSink>,
    cancel: CancellationToken,
    cache: ContentCache,
}

impl ProjectAnalyzer {
    pub fn new(
        config: Config,
        extractors: Vec<Box<dyn DependencyExtractor>>,
        annotators: Vec<Box<dyn FileAnnotator>>,
    ) -> Self {
        Self {
            config,
            builder: DependencyBuilder::new(extractors, annotators),
            host: Arc::new(NullHost),
            sink: Arc::new(TracingSink),
            cancel: CancellationToken::new(),
            cache: ContentCache::new(),
        }
    }

    pub fn with_host(mut self, host: Arc<dyn HostAdapter>) -> Self {
        self.host = host;
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Token that cancels the in-flight analysis at the next suspension
    /// point.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Content of an analyzed file from the per-run cache.
    pub fn file_content(&self, path: &str) -> Option<String> {
        self.cache.get(path)
    }

    /// Write file content on behalf of the host.
    pub async fn save_file(
        &self,
        root: &Path,
        rel_path: &str,
        content: &str,
    ) -> Result<(), AnalyzerError> {
        tokio::fs::write(root.join(rel_path), content)
            .await
            .map_err(|source| AnalyzerError::FileSave {
                path: rel_path.to_string(),
                source,
            })
    }

    /// Analyze the workspace under `root`.
    ///
    /// Per-file and per-directory failures are recovered locally; only an
    /// unreadable root surfaces as an error (the host is notified once).
    pub async fn analyze(&self, root: &Path) -> Result<AnalysisOutcome, AnalyzerError> {
        let started = Instant::now();
        self.cache.reset();
        self.progress(ProgressStage::ScanStart, "scanning workspace", Some(0));

        let scanner = Scanner::new(
            &self.config.scan,
            self.config.batching.directory_batch_size,
            self.sink.clone(),
            self.cancel.clone(),
        );
        let file_tree = match scanner.scan(root).await {
            Ok(tree) => tree,
            Err(err) => {
                self.notify_error(&err);
                return Err(err);
            }
        };
        if self.cancel.is_cancelled() {
            return Ok(AnalysisOutcome::Cancelled);
        }

        let mut files = flatten_supported(&file_tree);
        self.progress(
            ProgressStage::ScanDone,
            format!("scan complete: {} supported files", files.len()),
            Some(30),
        );
        self.check_memory("scan");

        self.progress(
            ProgressStage::DepsStart,
            "extracting dependencies",
            Some(35),
        );
        // Freeze the resolution snapshot before extraction begins.
        let file_map = FileMap::from_files(&files);

        let edges = match self.extract_all(root, &mut files, &file_map).await {
            Some(edges) => edges,
            None => return Ok(AnalysisOutcome::Cancelled),
        };
        let dependencies = DependencyBuilder::dedup(edges);
        self.progress(
            ProgressStage::DepsDone,
            format!("dependency analysis complete: {} edges", dependencies.len()),
            Some(80),
        );
        self.check_memory("deps");
        if self.cancel.is_cancelled() {
            return Ok(AnalysisOutcome::Cancelled);
        }

        let structure = self.assemble(root, file_tree, files, dependencies);
        self.progress(ProgressStage::Done, "analysis complete", Some(100));
        self.check_memory("done");

        let elapsed = started.elapsed();
        if elapsed.as_secs() >= self.config.limits.slow_analysis_warn_secs {
            self.sink.warn(
                LogRecord::new(format!("analysis took {}s", elapsed.as_secs()))
                    .with_kind(ErrorKind::PerformanceWarning)
                    .with_context(root.display().to_string()),
            );
        }

        Ok(AnalysisOutcome::Completed(structure))
    }

    /// Read and extract the flattened files in bounded batches. Returns
    /// `None` when cancelled between batches.
    async fn extract_all(
        &self,
        root: &Path,
        files: &mut [FileNode],
        file_map: &FileMap,
    ) -> Option<Vec<Dependency>> {
        let batch_size = self.config.batching.file_batch_size.max(1);
        let mut edges: Vec<Dependency> = Vec::new();

        let indices: Vec<usize> = (0..files.len()).collect();
        for batch in indices.chunks(batch_size) {
            if self.cancel.is_cancelled() {
                return None;
            }

            let targets: Vec<(usize, std::path::PathBuf)> = batch
                .iter()
                .map(|&idx| (idx, root.join(&files[idx].path)))
                .collect();
            let reads = targets
                .into_iter()
                .map(|(idx, full)| async move { (idx, tokio::fs::read_to_string(full).await) });

            for (idx, read) in join_all(reads).await {
                let content = match read {
                    Ok(content) => content,
                    Err(e) => {
                        self.sink.warn(
                            LogRecord::new(format!("failed to read file: {e}"))
                                .with_path(files[idx].path.clone())
                                .with_kind(ErrorKind::FileRead),
                        );
                        continue;
                    }
                };

                let source = SourceFile {
                    path: files[idx].path.clone(),
                    extension: files[idx].extension.clone(),
                    content,
                };
                edges.extend(self.builder.extract_file(&source, file_map));
                self.builder.annotate(&mut files[idx], &source.content);
                self.cache.insert(source.path, source.content);
            }
        }
        Some(edges)
    }

    fn assemble(
        &self,
        root: &Path,
        file_tree: Vec<FileNode>,
        mut files: Vec<FileNode>,
        dependencies: Vec<Dependency>,
    ) -> ProjectStructure {
        let file_paths: Vec<String> = files.iter().map(|f| f.path.clone()).collect();
        let graph = DependencyGraph::build(&file_paths, &dependencies);
        let metrics = graph.metrics();

        for cycle in &metrics.cycles {
            self.sink.warn(
                LogRecord::new(format!("circular dependency: {}", cycle.nodes.join(" -> ")))
                    .with_kind(ErrorKind::CircularDependency)
                    .with_context(cycle.key.clone()),
            );
        }

        let reference_counts = graph.reference_counts();
        let used = graph.used_paths();
        for file in &mut files {
            file.reference_count = reference_counts.get(&file.path).copied().unwrap_or(0);
            file.is_used = used.contains(&file.path);
        }

        let mut layers: LayerMap = Layer::ALL.iter().map(|l| (*l, Vec::new())).collect();
        for file in &files {
            layers
                .entry(layer::layer_of(file))
                .or_default()
                .push(file.path.clone());
        }

        let stats = build_stats(&files, &dependencies);

        ProjectStructure {
            root_path: root.display().to_string(),
            files,
            file_tree,
            dependencies,
            layers,
            stats,
            metrics,
        }
    }

    fn progress(&self, stage: ProgressStage, message: impl Into<String>, percent: Option<u8>) {
        let event = ProgressEvent::new(stage, message, percent);
        self.host.progress(&event);
        self.sink
            .debug(LogRecord::new(event.message.clone()).with_context(format!("{stage:?}")));
    }

    fn notify_error(&self, err: &AnalyzerError) {
        self.host.error(&ErrorEvent {
            kind: err.kind(),
            path: err.path().map(str::to_string),
            cause: err.to_string(),
            suggestion: err.suggestion().to_string(),
        });
        self.sink.error(
            LogRecord::new(err.to_string())
                .with_kind(err.kind())
                .with_context(err.suggestion().to_string()),
        );
    }

    fn check_memory(&self, milestone: &str) {
        let Some(used_mb) = process_memory_mb() else {
            return;
        };
        if used_mb > self.config.limits.memory_warn_mb {
            self.sink.warn(
                LogRecord::new(format!("heap usage {used_mb} MB at {milestone}"))
                    .with_kind(ErrorKind::MemoryWarning)
                    .with_context(format!("limit {} MB", self.config.limits.memory_warn_mb)),
            );
        }
    }
}

/// Resident memory of this process in megabytes, if the platform exposes
/// it.
fn process_memory_mb() -> Option<u64> {
    let pid = sysinfo::get_current_pid().ok()?;
    let mut system = sysinfo::System::new();
    system.refresh_process(pid);
    let process = system.process(pid)?;
    Some(process.memory() / (1024 * 1024))
}
