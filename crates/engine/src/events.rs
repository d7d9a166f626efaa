use std::path::PathBuf;

/// Totally ordered stream of notifications a job emits, drained by the
/// consumer from a `crossbeam_channel::Receiver<EngineEvent>`.
///
/// Stands in for the source's Qt signals (`info_message`, `progress_updated`,
/// `all_new_text_files`, `exception_occurred`, `update_results`,
/// `indexing_finished`, `searching_finished`): one channel, one variant per
/// signal, ordering preserved by construction since there is a single
/// producer per job.
#[derive(Debug, Clone)]
pub enum EngineEvent {
    /// Human-readable status line ("Indexing is started...", etc).
    InfoMessage(String),
    /// A non-fatal error occurred for a specific path; the job continues.
    ExceptionOccurred(String),
    /// Progress percentage in `0..=100`, monotonically non-decreasing within
    /// a job.
    ProgressUpdated(u8),
    /// A file was indexed as text, identified by its path relative to the
    /// scan root.
    NewTextFile(PathBuf),
    /// The scan job has finished walking and fingerprinting the tree.
    IndexingFinished,
    /// Match offsets found in one file, identified by its path relative to
    /// the scan root. Offsets are not pre-sorted; consumers sort before
    /// display if order matters to them.
    UpdateResults(PathBuf, Vec<usize>),
    /// The search job has finished dispatching every candidate file.
    SearchingFinished,
}
