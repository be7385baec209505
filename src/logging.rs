//! Logger setup for the `patchstat` binary.

use log::LevelFilter;

/// Map the `-v` count to a default level: warn, info, then debug.
pub fn level_for_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

/// Initialize logging to stderr. `RUST_LOG` takes precedence over `-v`.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_logging(verbose: u8) {
    let level = level_for_verbosity(verbose);

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }
    let _ = builder.format_timestamp(None).try_init();

    log::debug!("logging initialized at level: {}", level);
}
