//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `messenger`: verify token, page token, Graph API endpoint
//!
//! Sources are layered: struct defaults, then an optional `config.toml`, then
//! environment variables prefixed with `PAGEHOOK_` using `__` between nested
//! keys (e.g. `PAGEHOOK_MESSENGER__VERIFY_TOKEN`).

mod messenger;
mod server;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use messenger::MessengerConfig;
pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Messenger Platform configuration
    #[serde(default)]
    pub messenger: MessengerConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional `config.toml`
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::build(config::File::with_name("config").required(false), environment())
    }

    /// Load configuration from an explicit file, still honouring environment overrides
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        Self::build(config::File::from(path).required(true), environment())
    }

    fn build<S>(file: S, env: config::Environment) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let builder = config::Config::builder().add_source(file).add_source(env);

        let config = builder.build()?;
        config.try_deserialize()
    }
}

/// `PAGEHOOK_` environment source, `__` between nested keys
fn environment() -> config::Environment {
    config::Environment::with_prefix("PAGEHOOK")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
