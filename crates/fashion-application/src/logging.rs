//! Tracing subscriber setup.

use fashion_core::{FashionError, Result};
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

use crate::config::{LogFormat, LoggingConfig};

/// Builds the event filter. `RUST_LOG` wins over the configured level.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.level)
        .map_err(|e| FashionError::config(format!("Invalid log level {:?}: {}", config.level, e)))
}

fn build_stdout_layer(format: LogFormat) -> Box<dyn Layer<Registry> + Send + Sync> {
    match format {
        LogFormat::Plain => Box::new(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        ),
        LogFormat::Json => Box::new(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_current_span(true),
        ),
    }
}

/// Installs the global subscriber.
///
/// Fails with [`FashionError::Config`] when the level is invalid or a global
/// subscriber is already set.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(config)?;

    Registry::default()
        .with(build_stdout_layer(config.format))
        .with(filter)
        .try_init()
        .map_err(|e| FashionError::config(format!("Failed to install tracing subscriber: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_level_is_config_error() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let config = LoggingConfig {
            level: "fashion_core=verbose".to_string(),
            format: LogFormat::Plain,
        };
        assert!(build_filter(&config).unwrap_err().is_config());
    }

    #[test]
    fn test_valid_directives() {
        for level in ["info", "debug", "fashion_core=trace,warn"] {
            let config = LoggingConfig {
                level: level.to_string(),
                format: LogFormat::Json,
            };
            assert!(build_filter(&config).is_ok(), "rejected {}", level);
        }
    }
}
