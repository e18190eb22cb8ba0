// Logging setup shared by the CLI and the server

use tracing_subscriber::{fmt, EnvFilter};

/// Filter for a `-v` count. With no flag, `RUST_LOG` wins, then `warn`.
pub fn filter_for_verbosity(verbose: u8) -> EnvFilter {
    match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

/// Install the global subscriber. Logs go to stderr so stdout stays clean
/// for `calc --json` output.
pub fn init(verbose: u8) {
    let result = fmt()
        .with_env_filter(filter_for_verbosity(verbose))
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .try_init();

    if let Err(err) = result {
        eprintln!("⚠️  Logging already initialized: {}", err);
    }
}
