pub mod scan;
pub mod search;

use clap::Subcommand;
pub use scan::ScanArgs;
pub use search::SearchArgs;

/// Common error type for command handlers.
pub type CommandResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a fresh index over a directory tree.
    ///
    /// Example:
    ///   fossick scan /home/andrew/projects
    Scan(ScanArgs),

    /// Index a directory, then search it for a fixed string.
    ///
    /// Example:
    ///   fossick search needle --root /home/andrew/projects
    Search(SearchArgs),
}
