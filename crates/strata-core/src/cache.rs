use std::collections::HashMap;
use std::sync::RwLock;

/// Per-run file content cache, keyed by workspace-relative path.
///
/// Populated once while dependencies are extracted, then read-only: the
/// facade replaces the whole map at the start of each run and only hands
/// out clones afterwards.
#[derive(Debug, Default)]
pub struct ContentCache {
    inner: RwLock<HashMap<String, String>>,
}

impl ContentCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the previous run's contents.
    pub fn reset(&self) {
        self.inner.write().expect("content cache poisoned").clear();
    }

    pub fn insert(&self, path: String, content: String) {
        self.inner
            .write()
            .expect("content cache poisoned")
            .insert(path, content);
    }

    pub fn get(&self, path: &str) -> Option<String> {
        self.inner
            .read()
            .expect("content cache poisoned")
            .get(path)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.read().expect("content cache poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
