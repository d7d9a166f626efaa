use super::*;

use crate::events::EngineEvent;
use crossbeam::channel::unbounded;
use std::fs::write;
use std::time::Instant;

fn wait_until(mut pred: impl FnMut() -> bool, timeout: Duration) -> bool {
    let start = Instant::now();
    while start.elapsed() < timeout {
        if pred() {
            return true;
        }
        thread::sleep(Duration::from_millis(20));
    }
    false
}

#[test]
fn watcher_reindexes_file_on_modification() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("f.txt");
    write(&path, b"before").unwrap();

    let index = Arc::new(Index::new());
    let cancel = Arc::new(AtomicBool::new(false));
    let (events_tx, _events_rx) = unbounded();

    let (bridge, _handle) =
        WatcherBridge::spawn(index.clone(), cancel.clone(), events_tx.clone()).unwrap();
    bridge.subscribe(&path, &events_tx);

    // Seed the index as the initial scan would have.
    let initial_cancel = AtomicBool::new(false);
    if let FingerprintOutcome::Text(fp) = fingerprint_file(&path, &initial_cancel).unwrap() {
        index.insert(path.clone(), FileEntry { fingerprint: fp, size: 6 });
    }

    write(&path, b"after-change").unwrap();

    let found = wait_until(
        || {
            index
                .with_entry(&path, |e| e.fingerprint.len())
                .map(|len| len > 0)
                .unwrap_or(false)
        },
        Duration::from_secs(5),
    );
    assert!(found, "expected the watcher to re-fingerprint the file");

    cancel.store(true, Ordering::Relaxed);
}

#[test]
fn watcher_removes_entry_when_file_is_deleted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("f.txt");
    write(&path, b"content").unwrap();

    let index = Arc::new(Index::new());
    let cancel = Arc::new(AtomicBool::new(false));
    let (events_tx, _events_rx) = unbounded();

    let (bridge, _handle) =
        WatcherBridge::spawn(index.clone(), cancel.clone(), events_tx.clone()).unwrap();
    bridge.subscribe(&path, &events_tx);

    let initial_cancel = AtomicBool::new(false);
    if let FingerprintOutcome::Text(fp) = fingerprint_file(&path, &initial_cancel).unwrap() {
        index.insert(path.clone(), FileEntry { fingerprint: fp, size: 7 });
    }

    std::fs::remove_file(&path).unwrap();

    let removed = wait_until(|| !index.contains(&path), Duration::from_secs(5));
    assert!(removed, "expected the watcher to drop the deleted file");

    cancel.store(true, Ordering::Relaxed);
}
