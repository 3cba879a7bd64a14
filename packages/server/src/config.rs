use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

use crate::kernel::{FetcherConfig, DEFAULT_MAX_BODY_BYTES, DEFAULT_USER_AGENT};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub port: u16,
    pub fetch_timeout_secs: u64,
    pub fetch_user_agent: String,
    pub fetch_max_body_bytes: usize,
    /// Record checks for non-2xx responses instead of treating them as failures
    pub check_record_error_status: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a valid number")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            fetch_timeout_secs: env::var("FETCH_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("FETCH_TIMEOUT_SECS must be a valid number")?,
            fetch_user_agent: env::var("FETCH_USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),
            fetch_max_body_bytes: match env::var("FETCH_MAX_BODY_BYTES") {
                Ok(value) => value
                    .parse()
                    .context("FETCH_MAX_BODY_BYTES must be a valid number")?,
                Err(_) => DEFAULT_MAX_BODY_BYTES,
            },
            check_record_error_status: parse_flag(
                "CHECK_RECORD_ERROR_STATUS",
                env::var("CHECK_RECORD_ERROR_STATUS").ok().as_deref(),
            )?,
        })
    }

    /// Settings for the page fetcher used by checks
    pub fn fetcher_config(&self) -> FetcherConfig {
        FetcherConfig {
            timeout: Duration::from_secs(self.fetch_timeout_secs),
            user_agent: self.fetch_user_agent.clone(),
            max_body_bytes: self.fetch_max_body_bytes,
            record_error_status: self.check_record_error_status,
        }
    }
}

fn parse_flag(name: &str, value: Option<&str>) -> Result<bool> {
    match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        None | Some("") => Ok(false),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(other) => anyhow::bail!("{} must be a boolean, got {:?}", name, other),
    }
}
