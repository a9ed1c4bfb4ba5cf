use std::cmp::Ordering;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::{join_all, BoxFuture, FutureExt};
use globset::GlobSet;
use tokio_util::sync::CancellationToken;

use crate::classify;
use crate::config::ScanConfig;
use crate::error::{AnalyzerError, ErrorKind};
use crate::events::{LogRecord, LogSink};
use crate::types::FileNode;

/// Parallel, bounded-fan-out directory walker.
///
/// Directory entries are processed in fixed-size batches, each awaited to
/// completion before the next, which bounds concurrent open handles on
/// very large trees. A read failure below the root yields an empty child
/// list for that directory only.
pub struct Scanner {
    ignore_dirs: HashSet<String>,
    exclude: GlobSet,
    batch_size: usize,
    sink: Arc<dyn LogSink>,
    cancel: CancellationToken,
}

impl Scanner {
    pub fn new(
        config: &ScanConfig,
        batch_size: usize,
        sink: Arc<dyn LogSink>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            ignore_dirs: config.ignore_dirs.iter().cloned().collect(),
            exclude: config.exclude_set(),
            batch_size: batch_size.max(1),
            sink,
            cancel,
        }
    }

    /// Walk `root` and return its ordered top-level nodes.
    ///
    /// Only an unreadable root is surfaced as an error; everything deeper
    /// degrades to an empty subtree with a log record.
    pub async fn scan(&self, root: &Path) -> Result<Vec<FileNode>, AnalyzerError> {
        if let Err(source) = tokio::fs::read_dir(root).await {
            return Err(AnalyzerError::DirectoryRead {
                path: root.display().to_string(),
                source,
            });
        }
        Ok(self.scan_children(root.to_path_buf(), String::new()).await)
    }

    fn scan_children<'a>(&'a self, dir: PathBuf, rel: String) -> BoxFuture<'a, Vec<FileNode>> {
        async move {
            let mut reader = match tokio::fs::read_dir(&dir).await {
                Ok(reader) => reader,
                Err(e) => {
                    self.sink.warn(
                        LogRecord::new(format!("failed to read directory: {e}"))
                            .with_path(dir.display().to_string())
                            .with_kind(ErrorKind::DirectoryRead),
                    );
                    return Vec::new();
                }
            };

            let mut entries: Vec<(String, bool)> = Vec::new();
            loop {
                match reader.next_entry().await {
                    Ok(Some(entry)) => {
                        let name = entry.file_name().to_string_lossy().to_string();
                        let is_dir = entry
                            .file_type()
                            .await
                            .map(|t| t.is_dir())
                            .unwrap_or(false);
                        entries.push((name, is_dir));
                    }
                    Ok(None) => break,
                    Err(e) => {
                        self.sink.warn(
                            LogRecord::new(format!("directory listing interrupted: {e}"))
                                .with_path(dir.display().to_string())
                                .with_kind(ErrorKind::DirectoryRead),
                        );
                        break;
                    }
                }
            }
            // Deterministic batch composition regardless of readdir order.
            entries.sort();

            let kept: Vec<(String, bool)> = entries
                .into_iter()
                .filter(|(name, is_dir)| {
                    if name.starts_with('.') {
                        return false;
                    }
                    if *is_dir && self.ignore_dirs.contains(name.as_str()) {
                        return false;
                    }
                    !self.exclude.is_match(join_rel(&rel, name))
                })
                .collect();

            let mut children = Vec::with_capacity(kept.len());
            for batch in kept.chunks(self.batch_size) {
                if self.cancel.is_cancelled() {
                    break;
                }
                let tasks = batch
                    .iter()
                    .map(|(name, is_dir)| self.scan_entry(&dir, &rel, name.clone(), *is_dir));
                children.extend(join_all(tasks).await.into_iter().flatten());
            }

            children.sort_by(|a, b| {
                b.is_directory
                    .cmp(&a.is_directory)
                    .then_with(|| compare_names(&a.name, &b.name))
            });
            children
        }
        .boxed()
    }

    async fn scan_entry(
        &self,
        dir: &Path,
        rel: &str,
        name: String,
        is_dir: bool,
    ) -> Option<FileNode> {
        let full = dir.join(&name);
        let entry_rel = join_rel(rel, &name);

        if is_dir {
            let children = self.scan_children(full.clone(), entry_rel.clone()).await;
            let modified = modified_of(&full).await;
            return Some(FileNode::directory(
                entry_rel,
                full.display().to_string(),
                name,
                modified,
                children,
            ));
        }

        let metadata = match tokio::fs::metadata(&full).await {
            Ok(m) => m,
            Err(e) => {
                self.sink.warn(
                    LogRecord::new(format!("failed to stat file: {e}"))
                        .with_path(entry_rel)
                        .with_kind(ErrorKind::FileRead),
                );
                return None;
            }
        };

        let extension = classify::extension_of(&name);
        let type_tag = classify::classify(&extension);
        let modified = metadata
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or(DateTime::UNIX_EPOCH);

        Some(FileNode::file(
            entry_rel,
            full.display().to_string(),
            name,
            extension,
            metadata.len(),
            type_tag,
            modified,
        ))
    }
}

/// Locale-style ordering: case-insensitive, with a case-sensitive
/// tiebreak so the ordering stays total.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Flatten the tree into supported files, in tree (depth-first) order.
pub fn flatten_supported(tree: &[FileNode]) -> Vec<FileNode> {
    fn walk(nodes: &[FileNode], out: &mut Vec<FileNode>) {
        for node in nodes {
            if node.is_directory {
                if let Some(children) = &node.children {
                    walk(children, out);
                }
            } else if classify::is_supported(&node.extension) {
                out.push(node.clone());
            }
        }
    }
    let mut out = Vec::new();
    walk(tree, &mut out);
    out
}

fn join_rel(rel: &str, name: &str) -> String {
    if rel.is_empty() {
        name.to_string()
    } else {
        format!("{rel}/{name}")
    }
}

async fn modified_of(path: &Path) -> DateTime<Utc> {
    match tokio::fs::metadata(path).await {
        Ok(m) => m
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or(DateTime::UNIX_EPOCH),
        Err(_) => DateTime::UNIX_EPOCH,
    }
}
