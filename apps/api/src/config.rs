use anyhow::{Context, Result};

const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Application configuration loaded from environment variables.
/// Panics at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            database_max_connections: u32_or_default(
                std::env::var("DATABASE_MAX_CONNECTIONS").ok(),
                "DATABASE_MAX_CONNECTIONS",
                DEFAULT_DB_MAX_CONNECTIONS,
            )?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn u32_or_default(raw: Option<String>, key: &str, default: u32) -> Result<u32> {
    match raw {
        Some(raw) => raw
            .parse::<u32>()
            .with_context(|| format!("{key} must be a positive integer")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u32_or_default_uses_default_when_unset() {
        assert_eq!(
            u32_or_default(None, "DATABASE_MAX_CONNECTIONS", 10).unwrap(),
            10
        );
    }

    #[test]
    fn test_u32_or_default_parses_override() {
        assert_eq!(
            u32_or_default(Some("25".to_string()), "DATABASE_MAX_CONNECTIONS", 10).unwrap(),
            25
        );
    }

    #[test]
    fn test_u32_or_default_rejects_garbage() {
        assert!(u32_or_default(Some("ten".to_string()), "DATABASE_MAX_CONNECTIONS", 10).is_err());
    }
}
