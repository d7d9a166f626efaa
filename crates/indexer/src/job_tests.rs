use super::*;

use std::fs::write;
use std::time::Duration;

fn drain_until_finished(rx: &Receiver<EngineEvent>, timeout: Duration) -> Vec<EngineEvent> {
    let mut events = Vec::new();
    let deadline = std::time::Instant::now() + timeout;
    while std::time::Instant::now() < deadline {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(ev) => {
                let done = matches!(
                    ev,
                    EngineEvent::IndexingFinished | EngineEvent::SearchingFinished
                );
                events.push(ev);
                if done {
                    break;
                }
            }
            Err(_) => continue,
        }
    }
    events
}

#[test]
fn scan_then_search_reports_matches_only_for_matching_file() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().to_path_buf();
    write(root.join("a.txt"), b"abcabcabc").unwrap();
    write(root.join("b.txt"), b"xyz").unwrap();

    let (engine, rx) = Engine::new().unwrap();
    engine.scan(root.clone());
    let scan_events = drain_until_finished(&rx, Duration::from_secs(5));
    assert!(
        scan_events
            .iter()
            .any(|e| matches!(e, EngineEvent::IndexingFinished))
    );

    engine.search(b"abc".to_vec());
    let search_events = drain_until_finished(&rx, Duration::from_secs(5));

    let results: Vec<_> = search_events
        .iter()
        .filter_map(|e| match e {
            EngineEvent::UpdateResults(path, offsets) => Some((path.clone(), offsets.clone())),
            _ => None,
        })
        .collect();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].0, PathBuf::from("a.txt"));
    assert_eq!(results[0].1, vec![0, 3, 6]);
}

#[test]
fn cancel_during_search_still_emits_searching_finished() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().to_path_buf();
    write(root.join("a.txt"), b"needle in a haystack").unwrap();

    let (engine, rx) = Engine::new().unwrap();
    engine.scan(root.clone());
    drain_until_finished(&rx, Duration::from_secs(5));

    engine.search(b"needle".to_vec());
    engine.cancel();

    let events = drain_until_finished(&rx, Duration::from_secs(5));
    assert!(
        events
            .iter()
            .any(|e| matches!(e, EngineEvent::SearchingFinished))
    );
}

#[test]
fn watcher_reflects_post_scan_edits_without_rescanning() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().to_path_buf();
    let f = root.join("f.txt");
    write(&f, b"before").unwrap();

    let (engine, rx) = Engine::new().unwrap();
    engine.scan(root.clone());
    drain_until_finished(&rx, Duration::from_secs(5));

    write(&f, b"needle appears now").unwrap();

    // Give the watcher thread a chance to observe and re-fingerprint.
    let deadline = std::time::Instant::now() + Duration::from_secs(5);
    while std::time::Instant::now() < deadline {
        engine.search(b"needle".to_vec());
        let events = drain_until_finished(&rx, Duration::from_secs(1));
        if events
            .iter()
            .any(|e| matches!(e, EngineEvent::UpdateResults(..)))
        {
            return;
        }
        std::thread::sleep(Duration::from_millis(100));
    }
    panic!("expected the watcher to pick up the post-scan edit without a rescan");
}
