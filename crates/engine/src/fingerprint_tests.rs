use super::*;

use std::io::Write as _;
use std::sync::atomic::AtomicBool;

#[test]
fn fingerprints_small_text_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("f.txt");
    std::fs::write(&path, b"abcabcabc").expect("write");

    let cancel = AtomicBool::new(false);
    match fingerprint_file(&path, &cancel).expect("fingerprint ok") {
        FingerprintOutcome::Text(fp) => {
            let abc = Trigram::from_bytes(b'a', b'b', b'c');
            assert_eq!(fp.get(&abc), Some(&3));
        }
        _ => panic!("expected text outcome"),
    }
}

#[test]
fn fingerprint_missing_file_is_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("missing.txt");
    let cancel = AtomicBool::new(false);

    let err = fingerprint_file(&path, &cancel).unwrap_err();
    match err {
        EngineError::IoOpen(p, _) => assert_eq!(p, path),
        other => panic!("expected IoOpen, got {other:?}"),
    }
}

#[test]
fn fingerprint_respects_cancellation() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("f.txt");
    std::fs::write(&path, vec![b'x'; CHUNK_LEN * 2]).expect("write");

    let cancel = AtomicBool::new(true);
    match fingerprint_file(&path, &cancel).expect("fingerprint ok") {
        FingerprintOutcome::Cancelled => {}
        _ => panic!("expected cancelled outcome"),
    }
}

#[test]
fn fingerprint_classifies_high_distinct_trigram_file_as_non_text() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("blob.bin");

    // A file with enough distinct byte triples to blow past the threshold.
    let mut f = std::fs::File::create(&path).expect("create");
    let mut buf = Vec::with_capacity((TEXT_FILE_THRESHOLD + 1) * 3);
    for i in 0..=(TEXT_FILE_THRESHOLD as u32 + 1) {
        buf.push((i & 0xFF) as u8);
        buf.push(((i >> 8) & 0xFF) as u8);
        buf.push(((i >> 16) & 0xFF) as u8);
    }
    f.write_all(&buf).expect("write");

    let cancel = AtomicBool::new(false);
    match fingerprint_file(&path, &cancel).expect("fingerprint ok") {
        FingerprintOutcome::NonText => {}
        FingerprintOutcome::Text(fp) => panic!("expected non-text, got {} trigrams", fp.len()),
        FingerprintOutcome::Cancelled => panic!("unexpected cancellation"),
    }
}
