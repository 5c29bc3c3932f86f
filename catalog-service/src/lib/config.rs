use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub api: ApiConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    /// Initial account created when the users collection is empty.
    pub bootstrap: Option<BootstrapConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Versioned prefix every gated route lives under, e.g. `/api/v1`.
    #[serde(default = "default_prefix")]
    pub prefix: String,
    pub project_name: String,
}

/// Which store backs the repositories.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Mongodb,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub backend: StoreBackend,
    pub url: String,
    pub name: String,
    #[serde(default = "default_max_pool_size")]
    pub max_pool_size: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_expiration_minutes")]
    pub expiration_minutes: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BootstrapConfig {
    pub username: String,
    pub email: String,
    pub password: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_prefix() -> String {
    "/api/v1".to_string()
}

fn default_max_pool_size() -> u32 {
    100
}

fn default_expiration_minutes() -> i64 {
    30
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: DATABASE__URL=mongodb://... overrides database.url
            .add_source(
                Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        configuration.try_deserialize()
    }
}
