//! Configuration management for the equipment relay

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::fmt;

use crate::error::{AppError, AppResult};

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

/// Upstream service the relay forwards to.
///
/// Any of the three values may be empty: the relay then refuses every
/// request with a configuration error instead of failing at startup.
#[derive(Deserialize, Clone, Default)]
pub struct UpstreamConfig {
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub token: String,
}

/// Settings for the form client library
#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    pub relay_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    pub client: ClientConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        let server = ServerConfig::default();
        let logging = LoggingConfig::default();
        let client = ClientConfig::default();

        let config = Config::builder()
            .set_default("server.host", server.host)?
            .set_default("server.port", i64::from(server.port))?
            .set_default("logging.level", logging.level)?
            .set_default("logging.format", logging.format)?
            .set_default("client.relay_url", client.relay_url)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // e.g. EQUIPMENT_RELAY__SERVER__PORT=3000
            .add_source(
                Environment::with_prefix("EQUIPMENT_RELAY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("upstream.base_url", env::var("API_BASE_URL").ok())?
            .set_override_option("upstream.path", env::var("API_PATH").ok())?
            .set_override_option("upstream.token", env::var("API_TOKEN").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl UpstreamConfig {
    pub fn new(
        base_url: impl Into<String>,
        path: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            path: path.into(),
            token: token.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.normalized_base().is_empty() && !self.path.is_empty() && !self.token.is_empty()
    }

    /// Full upstream URL: base without trailing slashes, path with exactly
    /// one leading slash.
    pub fn url(&self) -> AppResult<String> {
        if !self.is_complete() {
            return Err(AppError::Configuration);
        }

        let path = if self.path.starts_with('/') {
            self.path.clone()
        } else {
            format!("/{}", self.path)
        };

        Ok(format!("{}{}", self.normalized_base(), path))
    }

    fn normalized_base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("base_url", &self.base_url)
            .field("path", &self.path)
            .field("token", &if self.token.is_empty() { "" } else { "<redacted>" })
            .finish()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            relay_url: "http://localhost:8080".to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            upstream: UpstreamConfig::default(),
            client: ClientConfig::default(),
        }
    }
}
