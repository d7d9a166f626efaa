use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use fossick_engine::EngineEvent;
use fossick_indexer::Engine;
use fossick_runtime::default_scan_root;

use crate::printer::print_event;

#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Directory to index. Defaults to the user's home directory.
    pub root: Option<PathBuf>,
}

pub fn run(args: ScanArgs) -> ExitCode {
    match execute(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("[error] {e}");
            ExitCode::from(2)
        }
    }
}

fn execute(args: ScanArgs) -> Result<ExitCode> {
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

    Ok(if had_exception {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    })
}
