use super::*;

use std::fs::{create_dir, write};
use std::sync::atomic::AtomicBool;

#[test]
fn build_index_indexes_text_files_and_emits_events() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root.join("a.txt"), b"abcabcabc").unwrap();
    create_dir(root.join("sub")).unwrap();
    write(root.join("sub").join("b.txt"), b"xyz").unwrap();

    let index = Index::new();
    let cancel = AtomicBool::new(false);
    let (tx, rx) = channel::unbounded();

    build_index(root, &index, &cancel, &tx).unwrap();

    assert_eq!(index.len(), 2);
    assert!(index.contains(&root.join("a.txt")));
    assert!(index.contains(&root.join("sub").join("b.txt")));

    let events: Vec<_> = rx.try_iter().collect();
    let new_files: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            EngineEvent::NewTextFile(p) => Some(p.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(new_files.len(), 2);
    assert!(
        events
            .iter()
            .any(|e| matches!(e, EngineEvent::IndexingFinished))
    );
}

#[test]
fn build_index_respects_cancellation() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root.join("a.txt"), b"content").unwrap();

    let index = Index::new();
    let cancel = AtomicBool::new(true);
    let (tx, _rx) = channel::unbounded();

    build_index(root, &index, &cancel, &tx).unwrap();

    assert!(index.is_empty());
}

#[test]
fn build_index_clears_previous_state() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root.join("a.txt"), b"abc").unwrap();

    let index = Index::new();
    let cancel = AtomicBool::new(false);
    let (tx, _rx) = channel::unbounded();

    build_index(root, &index, &cancel, &tx).unwrap();
    assert_eq!(index.len(), 1);

    std::fs::remove_file(root.join("a.txt")).unwrap();
    write(root.join("b.txt"), b"def").unwrap();

    build_index(root, &index, &cancel, &tx).unwrap();
    assert_eq!(index.len(), 1);
    assert!(index.contains(&root.join("b.txt")));
}
