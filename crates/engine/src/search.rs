use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use crossbeam::channel::{self, Sender};
use fossick_runtime::{BIG_FILE_THRESHOLD, CHUNK_LEN, MAX_NEEDLE_LEN, MIN_TRIGRAM_NEEDLE_LEN};

use crate::error::EngineError;
use crate::events::EngineEvent;
use crate::fingerprint::Fingerprint;
use crate::index::Index;
use crate::kmp;
use crate::trigram::build_trigram_counts;

pub fn validate_needle(needle: &[u8]) -> Result<(), EngineError> {
    if needle.is_empty() {
        return Err(EngineError::InvalidNeedle("needle must not be empty".into()));
    }
    if needle.len() > MAX_NEEDLE_LEN {
        return Err(EngineError::InvalidNeedle(format!(
            "needle longer than {MAX_NEEDLE_LEN} bytes"
        )));
    }
    Ok(())
}

/// Whether `file_fp` could possibly contain `needle`, without reading the
/// file. Short needles (`|n| < MIN_TRIGRAM_NEEDLE_LEN`) probe fingerprint
/// keys for byte containment; longer needles use the subset filter
/// (`∀t: count_needle(t) <= count_file(t)`). This is one-sided: it may admit
/// files that do not actually contain the needle, never reject ones that do.
fn passes_filter(needle: &[u8], needle_trigrams: &Fingerprint, file_fp: &Fingerprint) -> bool {
    if needle.len() < MIN_TRIGRAM_NEEDLE_LEN {
        file_fp.keys().any(|t| t.contains_subslice(needle))
    } else {
        needle_trigrams
            .iter()
            .all(|(t, &count)| file_fp.get(t).copied().unwrap_or(0) >= count)
    }
}

/// Stream `path` in `CHUNK_LEN` chunks, carrying the last `|n| - 1` bytes of
/// each chunk into the next so matches straddling a chunk boundary are found
/// exactly once. Returns every (possibly overlapping) match start offset,
/// relative to the start of the file.
fn scan_file(path: &Path, needle: &[u8], cancel: &AtomicBool) -> Result<Vec<usize>, EngineError> {
    let mut file = File::open(path).map_err(|e| EngineError::IoOpen(path.to_path_buf(), e))?;
    let overlap_len = needle.len() - 1;
    let mut carry: Vec<u8> = Vec::new();
    let mut chunk = vec![0u8; CHUNK_LEN];
    let mut next_pos: u64 = 0;
    let mut matches = Vec::new();

    loop {
        if cancel.load(Ordering::Relaxed) {
            break;
        }

        let n = file
            .read(&mut chunk)
            .map_err(|e| EngineError::IoRead(path.to_path_buf(), e))?;
        if n == 0 {
            break;
        }

        let mut window = Vec::with_capacity(carry.len() + n);
        window.extend_from_slice(&carry);
        window.extend_from_slice(&chunk[..n]);
        let window_start = next_pos - carry.len() as u64;

        for local in kmp::scan(&window, needle) {
            matches.push(window_start as usize + local);
        }

        next_pos += n as u64;
        if overlap_len > 0 {
            let keep_from = window.len().saturating_sub(overlap_len);
            carry = window[keep_from..].to_vec();
        }
    }

    Ok(matches)
}

fn emit_progress(events: &Sender<EngineEvent>, completed: usize, total: usize, last: u8) -> u8 {
    if total == 0 {
        return last;
    }
    let pct = ((completed as f64 / total as f64) * 100.0) as u8;
    let pct = pct.min(100);
    if pct > last {
        let _ = events.send(EngineEvent::ProgressUpdated(pct));
        pct
    } else {
        last
    }
}

fn relativize(path: &Path, root: &Path) -> PathBuf {
    path.strip_prefix(root).unwrap_or(path).to_path_buf()
}

/// Search every indexed text file for `needle`, emitting `UpdateResults` as
/// matches are found and `SearchingFinished` once every candidate has been
/// processed (including when cancelled partway through, mirroring the
/// source which always emits its terminal signals even on cancellation).
///
/// Files at or below [`BIG_FILE_THRESHOLD`] are scanned inline as they're
/// encountered; larger files are deferred and scanned in a worker per file,
/// streaming results back as each completes rather than polling.
pub fn search(
    index: &Index,
    root: &Path,
    needle: &[u8],
    cancel: &AtomicBool,
    events: &Sender<EngineEvent>,
) -> Result<(), EngineError> {
    validate_needle(needle)?;
    let _ = events.send(EngineEvent::InfoMessage(
        "Searching has been started...".into(),
    ));

    let needle_trigrams = build_trigram_counts(needle);
    let paths = index.indexed_paths();
    let total = paths.len();
    let mut completed = 0usize;
    let mut last_progress = 0u8;
    let mut big_candidates: Vec<PathBuf> = Vec::new();

    for path in &paths {
        if cancel.load(Ordering::Relaxed) {
            break;
        }

        let decision = index.with_entry(path, |entry| {
            (
                passes_filter(needle, &needle_trigrams, &entry.fingerprint),
                entry.size,
            )
        });
        let Some((passes, cached_size)) = decision else {
            continue;
        };

        if !passes {
            completed += 1;
            last_progress = emit_progress(events, completed, total, last_progress);
            continue;
        }

        // Re-stat rather than trust the size recorded at index time.
        let size = std::fs::metadata(path)
            .map(|m| m.len())
            .unwrap_or(cached_size);

        if size > BIG_FILE_THRESHOLD {
            big_candidates.push(path.clone());
            continue;
        }

        let matches = scan_file(path, needle, cancel)?;
        if !matches.is_empty() {
            let _ = events.send(EngineEvent::UpdateResults(relativize(path, root), matches));
        }
        completed += 1;
        last_progress = emit_progress(events, completed, total, last_progress);
    }

    if !cancel.load(Ordering::Relaxed) && !big_candidates.is_empty() {
        let (result_tx, result_rx) = channel::unbounded();
        thread::scope(|scope| {
            for path in &big_candidates {
                let result_tx = result_tx.clone();
                scope.spawn(move || {
                    let result = scan_file(path, needle, cancel);
                    let _ = result_tx.send((path.clone(), result));
                });
            }
            drop(result_tx);

            for (path, result) in result_rx {
                completed += 1;
                match result {
                    Ok(matches) if !matches.is_empty() => {
                        let _ = events
                            .send(EngineEvent::UpdateResults(relativize(&path, root), matches));
                    }
                    Ok(_) => {}
                    Err(e) => {
                        let _ = events.send(EngineEvent::ExceptionOccurred(e.to_string()));
                    }
                }
                last_progress = emit_progress(events, completed, total, last_progress);
            }
        });
    }

    emit_progress(events, total, total, last_progress);
    let _ = events.send(EngineEvent::InfoMessage("Searching has finished...".into()));
    let _ = events.send(EngineEvent::SearchingFinished);

    Ok(())
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
