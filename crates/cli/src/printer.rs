use fossick_engine::EngineEvent;

/// Prints one engine event the way the out-of-scope GUI shell would render
/// it, and reports whether it was an [`EngineEvent::ExceptionOccurred`].
///
/// Progress and info lines go to stderr (status, not data); `new_text_file`
/// and `update_results` — the actual payload of a scan/search — go to
/// stdout. Offsets are sorted before printing, mirroring the documented
/// shell responsibility of sorting at render time rather than trusting
/// producer order.
pub fn print_event(event: &EngineEvent) -> bool {
    match event {
        EngineEvent::InfoMessage(msg) => {
            eprintln!("[info] {msg}");
            false
        }
        EngineEvent::ExceptionOccurred(msg) => {
            eprintln!("[error] {msg}");
            true
        }
        EngineEvent::ProgressUpdated(pct) => {
            eprintln!("[progress] {pct}%");
            false
        }
        EngineEvent::NewTextFile(path) => {
            println!("{}", path.display());
            false
        }
        EngineEvent::IndexingFinished => {
            eprintln!("[info] indexing finished");
            false
        }
        EngineEvent::UpdateResults(path, offsets) => {
            let mut sorted = offsets.clone();
            sorted.sort_unstable();
            println!("{}: {sorted:?}", path.display());
            false
        }
        EngineEvent::SearchingFinished => {
            eprintln!("[info] searching finished");
            false
        }
    }
}
