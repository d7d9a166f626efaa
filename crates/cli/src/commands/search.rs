use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use fossick_engine::{EngineEvent, validate_needle};
use fossick_indexer::Engine;
use fossick_runtime::default_scan_root;

use crate::printer::print_event;

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Fixed string to search for (raw bytes, no regex/fuzzy matching).
    pub needle: String,

    /// Directory to index before searching. Defaults to the user's home
    /// directory.
    #[arg(long, short = 'r')]
    pub root: Option<PathBuf>,
}

pub fn run(args: SearchArgs) -> ExitCode {
    match execute(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("[error] {e}");
            ExitCode::from(2)
        }
    }
}

fn execute(args: SearchArgs) -> Result<ExitCode> {
    // Validated here too, matching the documented shell responsibility: an
    // invalid needle is rejected before any job (scan included) is started.
    validate_needle(args.needle.as_bytes()).context("invalid needle")?;
    let root = args.root.unwrap_or_else(default_scan_root);

    let (engine, events) = Engine::new()?;

    engine.scan(root);
    let mut had_exception = false;
    loop {
        let event = events.recv()?;
        had_exception |= print_event(&event);
        if matches!(event, EngineEvent::IndexingFinished) {
            break;
        }
    }

    engine.search(args.needle.into_bytes());
    loop {
        let event = events.recv()?;
        had_exception |= print_event(&event);
        if matches!(event, EngineEvent::SearchingFinished) {
            break;
        }
    }

    Ok(if had_exception {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    })
}
