//! Startup configuration and tracing setup

use gate_shared::config::{AppConfig, LogFormat, LoggingConfig};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Load configuration from the environment, reading `.env` first if present
pub fn load_config() -> AppConfig {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
        Err(error) if error.not_found() => {}
        Err(error) => eprintln!("Ignoring unreadable .env file: {}", error),
    }

    AppConfig::from_env()
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.as_str()));
    let registry = tracing_subscriber::registry().with(filter);

    let result = match logging.format {
        LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
        LogFormat::Pretty => registry.with(fmt::layer().pretty()).try_init(),
        LogFormat::Compact => registry.with(fmt::layer().compact()).try_init(),
    };

    if let Err(error) = result {
        eprintln!("Tracing already initialized: {}", error);
    }
}
