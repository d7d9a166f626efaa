use std::path::PathBuf;

pub const PROGRAM_NAME: &str = "fossick";

/// Controls the minimum `log` level emitted by [`crate::logging::init`].
pub const PROGRAM_LOG_LEVEL: &str = "FOSSICK_LOG_LEVEL";

/// Size of each chunk read from a file, both while fingerprinting and while
/// scanning a candidate during search. Bounds the memory used per in-flight
/// file regardless of file size.
pub const CHUNK_LEN: usize = 8192;

/// A file whose fingerprint grows past this many distinct trigrams is
/// classified as non-text and dropped from the index.
pub const TEXT_FILE_THRESHOLD: usize = 20_000;

/// Candidate files at or under this size are scanned inline on the search
/// dispatcher thread; larger files are handed to the worker pool.
pub const BIG_FILE_THRESHOLD: u64 = 512 * 1024;

/// Needles shorter than this cannot be meaningfully fingerprinted into a
/// single trigram, so the candidate filter falls back to probing fingerprint
/// keys directly.
pub const MIN_TRIGRAM_NEEDLE_LEN: usize = 3;

/// Largest needle a caller may hand to `search`.
pub const MAX_NEEDLE_LEN: usize = 10_000;

/// Default root for a scan when the caller (CLI or otherwise) does not name one.
pub fn default_scan_root() -> PathBuf {
    #[cfg(unix)]
    {
        std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }
    #[cfg(windows)]
    {
        std::env::var_os("USERPROFILE")
            .map(PathBuf::from)
            .or_else(|| {
                let drive = std::env::var_os("HOMEDRIVE")?;
                let path = std::env::var_os("HOMEPATH")?;
                Some(PathBuf::from(drive).join(path))
            })
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }
    #[cfg(not(any(unix, windows)))]
    {
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    }
}
