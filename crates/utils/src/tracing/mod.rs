//! Tracing subscriber setup for the catrust binaries

use catrust_core::constants::CATRUST_LOG_VAR;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing system
///
/// The filter comes from `CATRUST_LOG`, then `RUST_LOG`, then falls back to
/// `default_directive`, e.g. `warn` for commands whose stdout is meant to be
/// piped. Events go to stderr so stdout stays clean for rendered output.
pub fn init_with_default(
    default_directive: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let filter = filter_from_env(default_directive)?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(is_tty())
        .compact()
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

fn filter_from_env(
    default_directive: &str,
) -> Result<EnvFilter, Box<dyn std::error::Error + Send + Sync + 'static>> {
    if let Ok(directives) = std::env::var(CATRUST_LOG_VAR) {
        return Ok(EnvFilter::try_new(directives)?);
    }
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => Ok(EnvFilter::try_new(default_directive)?),
    }
}

/// Check if we're running in a TTY environment
fn is_tty() -> bool {
    std::io::IsTerminal::is_terminal(&std::io::stderr())
}
