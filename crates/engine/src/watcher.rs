use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam::channel::Sender;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::error::EngineError;
use crate::events::EngineEvent;
use crate::fingerprint::{FingerprintOutcome, fingerprint_file};
use crate::index::{FileEntry, Index};

const RECV_POLL: Duration = Duration::from_millis(200);

/// Bridges filesystem change notifications to live re-fingerprinting of
/// indexed files, standing in for the source's `QFileSystemWatcher` +
/// `text_file_changed` slot.
///
/// Each indexed text file is watched individually (non-recursively), rather
/// than watching the scan root as a whole, matching the source's
/// per-file `addPath` subscriptions.
pub struct WatcherBridge {
    watcher: Mutex<RecommendedWatcher>,
    limit_reached: AtomicBool,
}

impl WatcherBridge {
    /// Create the bridge and spawn the background thread that drains
    /// filesystem events, re-fingerprinting changed files against `index`.
    /// The thread exits once `cancel` is set or the notify channel
    /// disconnects (the watcher having been dropped).
    pub fn spawn(
        index: Arc<Index>,
        cancel: Arc<AtomicBool>,
        events: Sender<EngineEvent>,
    ) -> notify::Result<(Arc<Self>, JoinHandle<()>)> {
        let (tx, rx) = std::sync::mpsc::channel::<notify::Result<Event>>();
        let watcher = RecommendedWatcher::new(tx, notify::Config::default())?;

        let bridge = Arc::new(Self {
            watcher: Mutex::new(watcher),
            limit_reached: AtomicBool::new(false),
        });

        let thread_bridge = bridge.clone();
        let handle = thread::spawn(move || {
            loop {
                if cancel.load(Ordering::Relaxed) {
                    return;
                }
                match rx.recv_timeout(RECV_POLL) {
                    Ok(Ok(event)) => handle_event(&thread_bridge, &index, &cancel, &events, event),
                    Ok(Err(_)) => {}
                    Err(std::sync::mpsc::RecvTimeoutError::Timeout) => continue,
                    Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => return,
                }
            }
        });

        Ok((bridge, handle))
    }

    /// Subscribe to change notifications for `path`. Once the watch backend
    /// refuses a subscription (typically an OS watch-handle limit), this
    /// becomes a permanent no-op: the source hits the same wall with its
    /// `max_socket_limit_reached` flag, reporting it once and continuing in
    /// degraded mode rather than failing the whole job.
    pub fn subscribe(&self, path: &Path, events: &Sender<EngineEvent>) {
        if self.limit_reached.load(Ordering::Relaxed) {
            return;
        }
        let mut watcher = self.watcher.lock().unwrap();
        if watcher.watch(path, RecursiveMode::NonRecursive).is_err() {
            self.limit_reached.store(true, Ordering::Relaxed);
            let err = EngineError::WatchSubscriptionExhausted(path.to_path_buf());
            let _ = events.send(EngineEvent::ExceptionOccurred(err.to_string()));
        }
    }

    pub fn unsubscribe(&self, path: &Path) {
        let _ = self.watcher.lock().unwrap().unwatch(path);
    }

    /// Clear the "watch limit reached" flag, allowing subscriptions to be
    /// attempted again. Called when a watched file disappears (per §4.5) and
    /// at the start of every fresh `scan`, since a rescan rebuilds the watch
    /// set from nothing and deserves a clean shot at re-subscribing.
    pub fn reset_limit(&self) {
        self.limit_reached.store(false, Ordering::Relaxed);
    }
}

fn handle_event(
    bridge: &WatcherBridge,
    index: &Index,
    cancel: &AtomicBool,
    events: &Sender<EngineEvent>,
    event: Event,
) {
    if !matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Remove(_) | EventKind::Create(_)
    ) {
        return;
    }

    for path in &event.paths {
        index.remove(path);
        bridge.unsubscribe(path);

        if !path.exists() {
            bridge.reset_limit();
            continue;
        }

        match fingerprint_file(path, cancel) {
            Ok(FingerprintOutcome::Text(fingerprint)) => {
                let size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
                index.insert(path.clone(), FileEntry { fingerprint, size });
                bridge.subscribe(path, events);
            }
            Ok(FingerprintOutcome::NonText) | Ok(FingerprintOutcome::Cancelled) => {}
            Err(e) => {
                let _ = events.send(EngineEvent::ExceptionOccurred(e.to_string()));
            }
        }
    }
}

#[cfg(test)]
#[path = "watcher_tests.rs"]
mod tests;
