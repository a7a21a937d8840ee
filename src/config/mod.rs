use std::time::Duration;

use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;

fn default_refresh_delay_ms() -> u64 {
    1000
}

/// Configuration for the application
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Base URL of the remote sheet API web app
    pub api_url: String,

    /// How long to wait after a write before re-fetching, in milliseconds.
    ///
    /// Writes are answer-less (see `ApiClient::submit_record`), so the
    /// re-fetch is delayed to give the remote end time to apply the change.
    #[serde(default = "default_refresh_delay_ms")]
    pub refresh_delay_ms: u64,

    /// Log file path. Logging is disabled when unset, since the terminal
    /// UI owns stdout.
    #[serde(default)]
    pub log_file: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// This function will:
    /// 1. Load variables from .env file if it exists
    /// 2. Deserialize environment variables into Config struct
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let config = envy::from_env::<Config>()?;

        Ok(config)
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn refresh_delay(&self) -> Duration {
        Duration::from_millis(self.refresh_delay_ms)
    }
}

/// Initialize environment variables and load configuration
pub fn init() -> Result<Config> {
    dotenv().ok();

    let config = Config::load()?;

    Ok(config)
}
