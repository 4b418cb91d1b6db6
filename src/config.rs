//! Process configuration and tracing setup.
//!
//! Sources, later ones winning: built-in defaults, `config/default.*`,
//! `config/{RUN_ENV}.*`, then `APP__*` environment variables
//! (e.g. `APP__PORT=5000`).

use std::env;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const CONFIG_DIR: &str = "config";
const DEFAULT_ENV: &str = "development";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub log_level: String,
    /// Emit logs as JSON lines.
    pub log_json: bool,
}

impl AppConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Load configuration for the environment named by `RUN_ENV` (default
/// `development`).
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| DEFAULT_ENV.to_string());
    load_config_for(&run_env)
}

pub fn load_config_for(run_env: &str) -> Result<AppConfig, ConfigError> {
    Config::builder()
        .set_default("host", "0.0.0.0")?
        .set_default("port", 5000)?
        .set_default("environment", run_env)?
        .set_default("log_level", DEFAULT_LOG_LEVEL)?
        .set_default("log_json", false)?
        .add_source(File::with_name(&format!("{}/default", CONFIG_DIR)).required(false))
        .add_source(File::with_name(&format!("{}/{}", CONFIG_DIR, run_env)).required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?
        .try_deserialize()
}

fn default_filter(level: &str) -> String {
    format!("ledger_service={}", level)
}

/// Install the global tracing subscriber. `RUST_LOG` overrides `level`.
pub fn init_tracing(level: &str, json: bool) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| default_filter(level));

    let registry = tracing_subscriber::registry().with(EnvFilter::new(filter));
    let result = if json {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer()).try_init()
    };
    if let Err(err) = result {
        eprintln!("tracing subscriber already installed: {}", err);
    }
}
