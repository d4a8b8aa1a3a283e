use std::time::Duration;

use anyhow::{Context, Result};

use crate::api_client::{ClientConfig, RetryPolicy};

const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub timeout_secs: u64,
    pub read_retries: u32,
    pub write_retries: u32,
    pub retry_delay_ms: u64,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_url: std::env::var("EVALBOARD_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            timeout_secs: parse_env("EVALBOARD_TIMEOUT_SECS", 10)?,
            read_retries: parse_env("EVALBOARD_READ_RETRIES", RetryPolicy::read().max_retries)?,
            write_retries: parse_env("EVALBOARD_WRITE_RETRIES", RetryPolicy::write().max_retries)?,
            retry_delay_ms: parse_env("EVALBOARD_RETRY_DELAY_MS", 1000)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn client_config(&self) -> ClientConfig {
        let initial_delay = Duration::from_millis(self.retry_delay_ms);
        ClientConfig {
            base_url: self.api_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            read_policy: RetryPolicy {
                max_retries: self.read_retries,
                initial_delay,
            },
            write_policy: RetryPolicy {
                max_retries: self.write_retries,
                initial_delay,
            },
        }
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}
