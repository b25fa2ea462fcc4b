//! Logger initialisation shared by all commands

/// Initialize logging based on verbosity level
///
/// `-q` silences logging entirely; `RUST_LOG` overrides the default filter.
pub fn init(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // A second initialisation (e.g. in tests) is harmless
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .try_init();
}
