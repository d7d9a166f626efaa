use std::process::ExitCode;

use clap::Parser;

mod commands;
mod printer;

use commands::Command;
use fossick_runtime::logging;

#[derive(Debug, Parser)]
#[command(name = "fossick", version, about = "Directory-scoped substring search")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

fn main() -> ExitCode {
    logging::init().ok();

    let cli = Cli::parse();
    match cli.command {
        Command::Scan(args) => commands::scan::run(args),
        Command::Search(args) => commands::search::run(args),
    }
}
