use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Application configuration loaded from environment variables.
/// A `.env` file, when present, acts as the local secret store.
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: String,
    pub port: u16,
    pub rust_log: String,
    pub session_idle: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let idle_minutes = std::env::var("SESSION_IDLE_MINUTES")
            .unwrap_or_else(|_| "60".to_string())
            .parse::<u64>()
            .context("SESSION_IDLE_MINUTES must be a whole number of minutes")?;

        Ok(Config {
            groq_api_key: require_env("GROQ_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            session_idle: Duration::from_secs(idle_minutes * 60),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    let value = std::env::var(key)
        .with_context(|| format!("Required environment variable '{key}' is not set"))?;
    if value.trim().is_empty() {
        bail!("Required environment variable '{key}' is empty");
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_env_rejects_missing_key() {
        let err = require_env("COLDMAIL_TEST_DEFINITELY_UNSET").unwrap_err();
        assert!(err.to_string().contains("COLDMAIL_TEST_DEFINITELY_UNSET"));
    }

    #[test]
    fn test_require_env_rejects_blank_value() {
        std::env::set_var("COLDMAIL_TEST_BLANK_KEY", "   ");
        let err = require_env("COLDMAIL_TEST_BLANK_KEY").unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_require_env_returns_value() {
        std::env::set_var("COLDMAIL_TEST_PRESENT_KEY", "gsk_test");
        assert_eq!(require_env("COLDMAIL_TEST_PRESENT_KEY").unwrap(), "gsk_test");
    }
}
