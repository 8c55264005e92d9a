//! Logger setup for the CLI

/// Map `-v` repetitions to a default filter level.
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize env_logger on stderr. `RUST_LOG` takes precedence over the
/// verbosity-derived default.
pub fn init_logger(verbosity: u8) {
    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level_for(verbosity)));
    logger.target(env_logger::Target::Stderr);
    let _ = logger.try_init();
}
