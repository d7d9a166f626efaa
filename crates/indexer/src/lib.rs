mod directory_indexer;
mod job;

pub use directory_indexer::build_index;
pub use job::Engine;
