use tracing::Level;

/// Initialize the global tracing subscriber writing to stderr.
///
/// The board runs in the alternate screen, so stderr stays clean for
/// redirection (`corkboard 2> corkboard.log`). Safe to call multiple times;
/// subsequent calls are no-ops for the global subscriber.
pub fn init(max_level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_names(false)
        .try_init();
}

/// Level from a repeatable `-v` CLI flag: warnings by default, debug at
/// `-v`, full traces at `-vv`.
pub fn level_for_verbosity(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}
