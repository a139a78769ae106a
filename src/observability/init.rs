//! Tracing initialization and subscriber setup.
//!
//! Builds a `tracing_subscriber` registry with an `EnvFilter` and a `fmt`
//! layer writing either to stderr or to a [`RotatingFile`].

use super::file_writer::RotatingFile;
use crate::Config;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive when neither `RUST_LOG` nor the config sets one.
const DEFAULT_LEVEL: &str = "info";

/// Installs the global tracing subscriber.
///
/// # Level Resolution
///
/// 1. `RUST_LOG` environment variable (highest priority)
/// 2. `config.trace_level`
/// 3. Default: `"info"`
///
/// # Output
///
/// With `config.log_file` set, events go to that file, rotated at 10 MB with
/// three backups. Otherwise they go to stderr.
///
/// Returns `false` if a global subscriber was already installed; only the
/// first call takes effect.
///
/// # Example
///
/// ```rust
/// use jobboard::observability::init_tracing;
/// use jobboard::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = config.trace_level.as_deref().unwrap_or(DEFAULT_LEVEL);
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
    });

    let (file_layer, stderr_layer) = match &config.log_file {
        Some(path) => (
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_writer(RotatingFile::new(path.clone())),
            ),
            None,
        ),
        None => (None, Some(fmt::layer().with_writer(std::io::stderr))),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .is_ok()
}
