use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use anyhow::{Context, Result};
use crossbeam::channel::{self, Sender};
use fossick_engine::{EngineEvent, FileEntry, FingerprintOutcome, Index, fingerprint_file};
use fossick_fs::{FileRecord, walk_parallel};

fn emit_progress(events: &Sender<EngineEvent>, completed: usize, total: usize, last: u8) -> u8 {
    if total == 0 {
        return last;
    }
    let pct = ((completed as f64 / total as f64) * 100.0).min(100.0) as u8;
    if pct > last {
        let _ = events.send(EngineEvent::ProgressUpdated(pct));
        pct
    } else {
        last
    }
}

/// Walk `root`, fingerprinting every regular file and populating `index`
/// with the ones classified as text. Mirrors the source's `scanner::index`,
/// which iterates a recursive directory listing emitting
/// `new_text_file`/`progress_updated` as it goes.
///
/// The progress denominator is the top-level directory entry count, not the
/// full recursive file count, matching the source's `overall_files_count =
/// dir.count()`; percentage is clamped to 100 so it stays monotonic even
/// once the real (recursive) file count exceeds that estimate.
pub fn build_index(
    root: &Path,
    index: &Index,
    cancel: &AtomicBool,
    events: &Sender<EngineEvent>,
) -> Result<()> {
    index.clear();
    index.set_root(root.to_path_buf());

    let _ = events.send(EngineEvent::InfoMessage("Indexing is started...".into()));
    let _ = events.send(EngineEvent::InfoMessage(
        "Collecting information about files...".into(),
    ));

    let overall_estimate = std::fs::read_dir(root)
        .map(|rd| rd.count())
        .unwrap_or(0)
        .max(1);

    let (file_tx, file_rx) = channel::unbounded::<Vec<FileRecord>>();
    let num_threads = thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4);

    let walker_handle = {
        let root = root.to_path_buf();
        let tx = file_tx.clone();
        thread::spawn(move || walk_parallel(vec![root], tx, num_threads))
    };
    drop(file_tx);

    let mut processed = 0usize;
    let mut last_progress = 0u8;

    'outer: while let Ok(batch) = file_rx.recv() {
        for record in batch {
            if cancel.load(Ordering::Relaxed) {
                break 'outer;
            }
            if !record.is_regular_file() {
                continue;
            }

            match fingerprint_file(&record.full_path, cancel) {
                Ok(FingerprintOutcome::Text(fingerprint)) => {
                    let rel = record
                        .full_path
                        .strip_prefix(root)
                        .unwrap_or(&record.full_path)
                        .to_path_buf();
                    index.insert(
                        record.full_path.clone(),
                        FileEntry {
                            fingerprint,
                            size: record.size,
                        },
                    );
                    let _ = events.send(EngineEvent::NewTextFile(rel));
                }
                Ok(FingerprintOutcome::NonText) | Ok(FingerprintOutcome::Cancelled) => {}
                Err(e) => {
                    let _ = events.send(EngineEvent::ExceptionOccurred(e.to_string()));
                }
            }

            processed += 1;
            last_progress = emit_progress(events, processed, overall_estimate, last_progress);
        }
    }

    walker_handle
        .join()
        .map_err(|_| anyhow::anyhow!("directory walker thread panicked"))?
        .context("directory walk failed")?;

    let _ = events.send(EngineEvent::InfoMessage(format!(
        "Done! Total number of text files: {}",
        index.len()
    )));
    emit_progress(events, overall_estimate, overall_estimate, last_progress);
    let _ = events.send(EngineEvent::IndexingFinished);

    Ok(())
}

#[cfg(test)]
#[path = "directory_indexer_tests.rs"]
mod tests;
