use std::path::{Path, PathBuf};
use std::sync::RwLock;

use hashbrown::HashMap;

use crate::fingerprint::Fingerprint;

/// One indexed text file: its content fingerprint plus the metadata needed
/// to decide inline-vs-spawned scanning and to relativize paths for display.
pub struct FileEntry {
    pub fingerprint: Fingerprint,
    pub size: u64,
}

/// In-memory store of indexed files, guarded by an `RwLock` so that
/// watcher-driven re-fingerprinting does not race with concurrent searches.
///
/// Mirrors the source's `DaemonState`, which guards a swappable `Index`
/// behind a lock; here the lock guards individual entries rather than the
/// whole structure being swapped wholesale, since files are invalidated one
/// at a time by the watcher instead of the whole tree being rebuilt.
#[derive(Default)]
pub struct Index {
    root: RwLock<Option<PathBuf>>,
    entries: RwLock<HashMap<PathBuf, FileEntry>>,
}

impl Index {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<PathBuf> {
        self.root.read().unwrap().clone()
    }

    pub fn set_root(&self, root: PathBuf) {
        *self.root.write().unwrap() = Some(root);
    }

    /// Drop every entry, resetting the index for a new scan job.
    pub fn clear(&self) {
        *self.root.write().unwrap() = None;
        self.entries.write().unwrap().clear();
    }

    pub fn insert(&self, path: PathBuf, entry: FileEntry) {
        self.entries.write().unwrap().insert(path, entry);
    }

    pub fn remove(&self, path: &Path) {
        self.entries.write().unwrap().remove(path);
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.read().unwrap().contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Absolute paths of every indexed (text) file, for the search
    /// dispatcher to fan out over and the watcher to subscribe to.
    pub fn indexed_paths(&self) -> Vec<PathBuf> {
        self.entries.read().unwrap().keys().cloned().collect()
    }

    /// Run `f` against the entry at `path`, if indexed. Takes the read lock
    /// only for the duration of the closure.
    pub fn with_entry<R>(&self, path: &Path, f: impl FnOnce(&FileEntry) -> R) -> Option<R> {
        self.entries.read().unwrap().get(path).map(f)
    }
}

#[cfg(test)]
#[path = "index_tests.rs"]
mod tests;
