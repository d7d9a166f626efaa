mod error;
mod events;
mod fingerprint;
mod index;
mod kmp;
mod search;
mod trigram;
mod watcher;

pub use error::EngineError;
pub use events::EngineEvent;
pub use fingerprint::{Fingerprint, FingerprintOutcome, fingerprint_file};
pub use index::{FileEntry, Index};
pub use kmp::{direct_scan, kmp_search};
pub use search::{search, validate_needle};
pub use trigram::{Trigram, TrigramWindow, build_trigram_counts};
pub use watcher::WatcherBridge;
