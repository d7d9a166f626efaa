mod config;
pub mod logging;

pub use config::{
    BIG_FILE_THRESHOLD, CHUNK_LEN, MAX_NEEDLE_LEN, MIN_TRIGRAM_NEEDLE_LEN, PROGRAM_LOG_LEVEL,
    PROGRAM_NAME, TEXT_FILE_THRESHOLD, default_scan_root,
};

pub use logging::init;
