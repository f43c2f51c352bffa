//! Service configuration

use ::config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Settings of the watchlist service, read from `WATCHLIST_*` variables
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// Emit the joined movie fields in `get` responses
    pub include_details: bool,
    /// Apply pending migrations on startup
    pub run_migrations: bool,
    /// Fallback log filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("bind_addr", "0.0.0.0:3001")?
            .set_default("include_details", false)?
            .set_default("run_migrations", true)?
            .set_default("log_level", "info")?
            .add_source(Environment::with_prefix("WATCHLIST").try_parsing(true))
            .build()?
            .try_deserialize()
    }
}
