use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use crossbeam::channel::{self, Receiver, Sender};
use fossick_engine::{EngineEvent, Index, WatcherBridge, search as engine_search, validate_needle};

use crate::directory_indexer::build_index;

struct RunningJob {
    cancel: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

/// The library-level handle exposing `scan`/`search`/`cancel` and a single
/// ordered event stream: the in-process analogue of the source's daemon RPC
/// surface, minus the RPC.
///
/// At most one scan or search job runs at a time; starting a new one joins
/// the previous job first. The filesystem watcher is independent of job
/// lifecycle: it is (re)subscribed to the current text-file set at the end
/// of each `scan`, and keeps running across `search` calls and `cancel`,
/// matching the source's `QFileSystemWatcher` outliving any one operation.
pub struct Engine {
    index: Arc<Index>,
    events_tx: Sender<EngineEvent>,
    job: Mutex<Option<RunningJob>>,
    watcher: Arc<WatcherBridge>,
    watcher_cancel: Arc<AtomicBool>,
    watcher_handle: Mutex<Option<JoinHandle<()>>>,
}

impl Engine {
    /// Construct an engine and start its watcher thread. Returns the
    /// receiving half of the event channel; there is exactly one consumer
    /// per engine.
    pub fn new() -> notify::Result<(Arc<Self>, Receiver<EngineEvent>)> {
        let (events_tx, events_rx) = channel::unbounded();
        let index = Arc::new(Index::new());
        let watcher_cancel = Arc::new(AtomicBool::new(false));

        let (watcher, watcher_handle) =
            WatcherBridge::spawn(index.clone(), watcher_cancel.clone(), events_tx.clone())?;

        let engine = Arc::new(Self {
            index,
            events_tx,
            job: Mutex::new(None),
            watcher,
            watcher_cancel,
            watcher_handle: Mutex::new(Some(watcher_handle)),
        });

        Ok((engine, events_rx))
    }

    /// Cancel whatever scan or search job is currently running, blocking
    /// until it has observed cancellation and exited. A no-op if idle.
    /// Does not affect the watcher.
    pub fn cancel(&self) {
        if let Some(job) = self.job.lock().unwrap().take() {
            job.cancel.store(true, Ordering::Relaxed);
            let _ = job.handle.join();
        }
    }

    /// Re-index `root` from scratch, replacing any previous index contents.
    /// Cancels and joins any job already running first.
    pub fn scan(self: &Arc<Self>, root: PathBuf) {
        self.cancel();

        for path in self.index.indexed_paths() {
            self.watcher.unsubscribe(&path);
        }
        self.watcher.reset_limit();

        let cancel = Arc::new(AtomicBool::new(false));
        let index = self.index.clone();
        let events_tx = self.events_tx.clone();
        let watcher = self.watcher.clone();
        let job_cancel = cancel.clone();

        let handle = std::thread::spawn(move || {
            if let Err(e) = build_index(&root, &index, &job_cancel, &events_tx) {
                let _ = events_tx.send(EngineEvent::ExceptionOccurred(e.to_string()));
                return;
            }
            for path in index.indexed_paths() {
                watcher.subscribe(&path, &events_tx);
            }
        });

        *self.job.lock().unwrap() = Some(RunningJob { cancel, handle });
    }

    /// Search the currently indexed files for `needle`. Cancels and joins
    /// any job already running first; unlike `scan`, the index itself is
    /// left untouched.
    ///
    /// The needle is validated before anything else: an invalid needle is
    /// rejected without touching whatever job is currently running, matching
    /// the "no job started" contract for `InputValidation` errors.
    pub fn search(self: &Arc<Self>, needle: Vec<u8>) {
        if let Err(e) = validate_needle(&needle) {
            let _ = self.events_tx.send(EngineEvent::ExceptionOccurred(e.to_string()));
            return;
        }

        self.cancel();

        let cancel = Arc::new(AtomicBool::new(false));
        let index = self.index.clone();
        let events_tx = self.events_tx.clone();
        let root = self.index.root().unwrap_or_default();
        let job_cancel = cancel.clone();

        let handle = std::thread::spawn(move || {
            if let Err(e) = engine_search(&index, &root, &needle, &job_cancel, &events_tx) {
                let _ = events_tx.send(EngineEvent::ExceptionOccurred(e.to_string()));
            }
        });

        *self.job.lock().unwrap() = Some(RunningJob { cancel, handle });
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.cancel();
        self.watcher_cancel.store(true, Ordering::Relaxed);
        if let Some(handle) = self.watcher_handle.lock().unwrap().take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
