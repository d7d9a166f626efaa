use std::fmt;
use std::path::PathBuf;

/// Errors surfaced by the fingerprinter, search dispatcher and watcher
/// bridge. Kept as a closed enum (rather than `anyhow::Error`) since callers
/// (the indexer, the CLI) branch on the kind of failure rather than just
/// logging it.
#[derive(Debug)]
pub enum EngineError {
    /// A file could not be opened for reading. Carries the path so the
    /// caller can report which file failed without losing context, mirroring
    /// the source's `"Cannot open the file " + filename` exception.
    IoOpen(PathBuf, std::io::Error),
    /// Reading an already-open file failed partway through.
    IoRead(PathBuf, std::io::Error),
    /// The watcher cannot subscribe to any more paths. Surfaced once; the
    /// watcher keeps running in degraded mode afterwards (existing
    /// subscriptions remain active, no new ones are attempted).
    WatchSubscriptionExhausted(PathBuf),
    /// A needle failed validation (empty, or longer than `MAX_NEEDLE_LEN`).
    InvalidNeedle(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::IoOpen(path, err) => {
                write!(f, "cannot open {}: {err}", path.display())
            }
            EngineError::IoRead(path, err) => {
                write!(f, "error reading {}: {err}", path.display())
            }
            EngineError::WatchSubscriptionExhausted(path) => {
                write!(f, "cannot watch {}", path.display())
            }
            EngineError::InvalidNeedle(msg) => write!(f, "invalid needle: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::IoOpen(_, err) | EngineError::IoRead(_, err) => Some(err),
            EngineError::WatchSubscriptionExhausted(_) | EngineError::InvalidNeedle(_) => None,
        }
    }
}
