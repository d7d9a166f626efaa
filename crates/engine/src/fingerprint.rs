use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use fossick_runtime::{CHUNK_LEN, TEXT_FILE_THRESHOLD};
use hashbrown::HashMap;

use crate::error::EngineError;
use crate::trigram::{Trigram, TrigramWindow};

pub type Fingerprint = HashMap<Trigram, u32>;

/// Outcome of fingerprinting a single file.
pub enum FingerprintOutcome {
    /// The file's distinct-trigram count stayed within
    /// [`TEXT_FILE_THRESHOLD`]; it is treated as text and indexed.
    Text(Fingerprint),
    /// The file grew past [`TEXT_FILE_THRESHOLD`] distinct trigrams and is
    /// dropped rather than indexed, mirroring the source's binary-file
    /// heuristic.
    NonText,
    /// The job was cancelled mid-read. The partial fingerprint is discarded.
    Cancelled,
}

/// Stream `path` in [`CHUNK_LEN`] chunks, building its trigram fingerprint.
///
/// Classification happens as a side effect of streaming: once the distinct
/// trigram count exceeds [`TEXT_FILE_THRESHOLD`] the read stops early and
/// [`FingerprintOutcome::NonText`] is returned, since the file can never
/// come back under the threshold by reading further.
pub fn fingerprint_file(path: &Path, cancel: &AtomicBool) -> Result<FingerprintOutcome, EngineError> {
    let mut file = File::open(path).map_err(|e| EngineError::IoOpen(path.to_path_buf(), e))?;
    let mut chunk = vec![0u8; CHUNK_LEN];
    let mut window = TrigramWindow::new();

    loop {
        if cancel.load(Ordering::Relaxed) {
            return Ok(FingerprintOutcome::Cancelled);
        }

        let n = file
            .read(&mut chunk)
            .map_err(|e| EngineError::IoRead(path.to_path_buf(), e))?;
        if n == 0 {
            break;
        }

        window.push_chunk(&chunk[..n]);
        if window.distinct_count() > TEXT_FILE_THRESHOLD {
            return Ok(FingerprintOutcome::NonText);
        }
    }

    Ok(FingerprintOutcome::Text(window.into_counts()))
}

#[cfg(test)]
#[path = "fingerprint_tests.rs"]
mod tests;
