use std::{
    fs::{self, read_dir},
    io::Result,
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    thread,
    time::Duration,
};

use crossbeam::channel::{self, RecvTimeoutError, Sender};
use log::{debug, warn};

use crate::{config::BATCH_SIZE, record::FileRecord};

/// Multi-threaded parallel walk using crossbeam for improved performance.
///
/// Uses a work-stealing approach where multiple threads process directories
/// concurrently. Records are batched before sending to reduce channel overhead.
/// Never follows symbolic links: a symlinked directory is recorded but not
/// recursed into, and a symlinked file is recorded but left for the caller
/// to skip (see [`FileRecord::is_regular_file`]).
pub fn walk_parallel(
    roots: Vec<PathBuf>,
    file_tx: Sender<Vec<FileRecord>>,
    num_threads: usize,
) -> Result<()> {
    let (work_tx, work_rx) = channel::unbounded::<PathBuf>();

    // Track pending work items to know when to terminate.
    let pending = Arc::new(AtomicUsize::new(roots.len()));

    for root in roots {
        let _ = work_tx.send(root);
    }

    debug!("[walk_parallel] starting with {} threads", num_threads);

    thread::scope(|s| {
        for _thread_id in 0..num_threads {
            let work_rx = work_rx.clone();
            let work_tx = work_tx.clone();
            let file_tx = file_tx.clone();
            let pending = Arc::clone(&pending);

            s.spawn(move || {
                worker_loop(work_rx, work_tx, file_tx, &pending);
            });
        }
    });

    Ok(())
}

/// Worker loop for parallel walking.
/// Each worker processes directories from the work queue and sends batched records.
fn worker_loop(
    work_rx: channel::Receiver<PathBuf>,
    work_tx: channel::Sender<PathBuf>,
    file_tx: Sender<Vec<FileRecord>>,
    pending: &AtomicUsize,
) {
    let mut batch = Vec::with_capacity(BATCH_SIZE);

    loop {
        // Use timeout to periodically check if all work is done.
        match work_rx.recv_timeout(Duration::from_millis(50)) {
            Ok(dir) => {
                if let Err(e) = scan_dir_parallel(&dir, &work_tx, &mut batch, pending) {
                    warn!("[walker] scan_dir_parallel({:?}) failed: {e}", dir);
                }
                if batch.len() >= BATCH_SIZE {
                    let to_send = std::mem::take(&mut batch);
                    if file_tx.send(to_send).is_err() {
                        return;
                    }
                }

                if pending.fetch_sub(1, Ordering::AcqRel) == 1 {
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                if pending.load(Ordering::Acquire) == 0 {
                    break;
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    if !batch.is_empty() {
        let _ = file_tx.send(batch);
    }
}

/// Scan a directory for the parallel walker.
/// Pushes subdirectories to the work queue and collects records in a batch.
fn scan_dir_parallel(
    dir: &Path,
    work_tx: &channel::Sender<PathBuf>,
    batch: &mut Vec<FileRecord>,
    pending: &AtomicUsize,
) -> Result<()> {
    let rd = match read_dir(dir) {
        Ok(rd) => rd,
        Err(e) => {
            warn!("[walker] read_dir({:?}) failed: {e}", dir);
            return Ok(());
        }
    };

    for entry_res in rd {
        let entry = match entry_res {
            Ok(e) => e,
            Err(e) => {
                warn!("[walker] error reading entry in {:?}: {e}", dir);
                continue;
            }
        };

        match inspect_fs_entry(&entry) {
            Ok(record) => {
                if should_recurse(&record) {
                    // Bump pending before sending so the terminating worker
                    // never observes `pending == 0` while work is in flight.
                    pending.fetch_add(1, Ordering::AcqRel);
                    let _ = work_tx.send(record.full_path.clone());
                }
                batch.push(record);
            }
            Err(e) => {
                warn!("[walker] inspect_fs_entry error in {:?}: {e}", dir);
            }
        }
    }

    Ok(())
}

fn should_recurse(f: &FileRecord) -> bool {
    f.is_dir && !f.is_symlink
}

fn inspect_fs_entry(entry: &fs::DirEntry) -> Result<FileRecord> {
    let metadata = entry.metadata()?;
    let full_path = entry.path();

    let is_dir = metadata.is_dir();
    let is_symlink = metadata.is_symlink();
    let is_file = metadata.is_file();
    let is_special = !is_dir && !is_symlink && !is_file;

    let size = if is_dir { 0 } else { metadata.len() };

    Ok(FileRecord {
        full_path,
        size,
        is_dir,
        is_symlink,
        is_special,
    })
}

#[cfg(test)]
#[path = "walker_tests.rs"]
mod tests;
