use anyhow::Result;
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Logs go to stderr; stdout is reserved for
/// the JSON export. `RUST_LOG` takes precedence over `default_filter`.
pub fn init_logging(default_filter: &str, verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        match std::env::var(EnvFilter::DEFAULT_ENV) {
            Ok(env) if !env.is_empty() => EnvFilter::try_new(env)?,
            _ => EnvFilter::try_new(default_filter)?,
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();

    Ok(())
}
