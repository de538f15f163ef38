use tracing_subscriber::{EnvFilter, prelude::*};

use crate::errors::{ThttpError, ThttpResult};

/// Directive added by `--verbose` so the fetch lines always show
const VERBOSE_FILTER: &str = "thttp=info";

/// Pick the log filter for this run.
///
/// `--verbose` contributes `thttp=info` and `RUST_LOG` directives are layered
/// on top, so a global level such as `warn` does not hide the fetch lines.
/// Without either, logging stays off.
fn select_filter(rust_log: Option<String>, verbose: bool) -> Option<EnvFilter> {
    match (rust_log, verbose) {
        (Some(directives), true) => Some(EnvFilter::new(format!(
            "{},{}",
            VERBOSE_FILTER, directives
        ))),
        (Some(directives), false) => Some(EnvFilter::new(directives)),
        (None, true) => Some(EnvFilter::new(VERBOSE_FILTER)),
        (None, false) => None,
    }
}

/// Initialize logging based on environment configuration
///
/// # Environment Variables
/// - `RUST_LOG`: Controls logging verbosity (trace, debug, info, warn, error)
///
/// Everything goes to stderr; stdout is reserved for fetched content.
pub fn init_logging(verbose: bool) -> ThttpResult<()> {
    let Some(env_filter) = select_filter(std::env::var("RUST_LOG").ok(), verbose) else {
        return Ok(());
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact();

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .try_init()
        .map_err(|e| ThttpError::LoggingInitialization(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::filter::LevelFilter;

    use super::*;

    #[test]
    fn test_quiet_without_env_or_verbose() {
        assert!(select_filter(None, false).is_none());
    }

    #[test]
    fn test_verbose_enables_crate_logging() {
        let filter = select_filter(None, true).unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_rust_log_can_raise_verbose_level() {
        let filter = select_filter(Some("debug".to_string()), true).unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_verbose_survives_quieter_rust_log() {
        let filter = select_filter(Some("warn".to_string()), true).unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));

        let filter = select_filter(Some("warn".to_string()), false).unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }
}
