//! Logging initializer
//!
//! Everything goes to stderr, stdout is reserved for the mission itself.

use std::io::IsTerminal;

use eyre::Result;
use tracing_subscriber::fmt::time::Uptime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Default level depending on the number of `-v`.  Rejected lines are logged as `warn` so they
/// are always visible.
///
pub fn default_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

pub fn init_logging(verbose: u8) -> Result<()> {
    // Load filters from environment, `RUST_LOG` wins over `-v`
    //
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level(verbose)))?;

    let fmt = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_timer(Uptime::default())
        .with_target(verbose > 1);

    // Combine filter & specific format
    //
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt)
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0, "warn")]
    #[case(1, "info")]
    #[case(2, "debug")]
    #[case(3, "trace")]
    #[case(9, "trace")]
    fn test_default_level(#[case] verbose: u8, #[case] level: &str) {
        assert_eq!(level, default_level(verbose));
    }
}
