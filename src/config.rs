use anyhow::{Context, Result};
use secrecy::SecretString;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub entry: EntryConfig,
    pub truenas: TrueNasConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub polling: PollingConfig,
}

/// Instance identity, used to namespace disk entity ids so two bridged
/// appliances never collide.
#[derive(Debug, Deserialize, Clone)]
pub struct EntryConfig {
    #[serde(default = "default_entry_name")]
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TrueNasConfig {
    pub host: String,
    pub auth: AuthConfig,
    #[serde(default = "default_use_tls")]
    pub use_tls: bool,
    #[serde(default = "default_verify_ssl")]
    pub verify_ssl: bool,
}

/// Authentication mode selector.
///
/// TrueNAS accepts either an API key or a username/password pair; the
/// `mode` field picks which call the connection layer issues.
#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AuthConfig {
    ApiKey {
        api_key: SecretString,
    },
    Password {
        username: String,
        password: SecretString,
    },
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_addr")]
    pub addr: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PollingConfig {
    #[serde(default = "default_poll_interval")]
    pub interval_seconds: u64,
}

impl Default for EntryConfig {
    fn default() -> Self {
        Self {
            name: default_entry_name(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            port: default_port(),
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_seconds: default_poll_interval(),
        }
    }
}

fn default_entry_name() -> String {
    "truenas".to_string()
}

fn default_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8099
}

fn default_use_tls() -> bool {
    false
}

fn default_verify_ssl() -> bool {
    true
}

fn default_poll_interval() -> u64 {
    30
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        // Load environment variables from .env if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("TRUENAS_BRIDGE").separator("__"))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
