pub mod config;
pub mod error;
pub mod http;
pub mod locale;
pub mod refresh_gate;

pub use config::{
    Config, DashboardConfig, NewsConfig, OverlapPolicy, TitlePolicyKind, ValidationResult,
    Variant, WeatherConfig,
};
pub use error::{AppError, ConfigError, DataShapeError, FeedParseError, NetworkError};
pub use http::HttpJsonClient;
pub use locale::Locale;
pub use refresh_gate::RefreshGate;

use anyhow::Result;

/// Initialize the core application
pub fn init() -> Result<()> {
    // Initialize tracing/logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    tracing::info!("DashB core initialized");
    Ok(())
}
