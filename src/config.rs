//! Configuration loaded from the environment.
//!
//! Secrets and the database URL are mandatory: a missing or unusable value
//! aborts startup instead of falling back to anything embedded in the
//! binary. Only non-secret operational knobs (bind address, pool size,
//! provider base URL) carry defaults.
use std::env;
use thiserror::Error;

/// Minimum accepted signing-secret length in bytes.
const MIN_JWT_SECRET_LEN: usize = 32;

const DEFAULT_PROVIDER_BASE_URL: &str = "https://api.mux.com";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

#[derive(Clone, Debug)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub provider: VideoProviderConfig,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

#[derive(Clone, Debug)]
pub struct VideoProviderConfig {
    pub base_url: String,
    pub token_id: String,
    pub token_secret: String,
}

impl Config {
    /// Load and validate configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = require("JWT_SECRET")?;
        if jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(ConfigError::Invalid(
                "JWT_SECRET",
                format!("must be at least {MIN_JWT_SECRET_LEN} bytes"),
            ));
        }

        Ok(Config {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_or("PORT", 8080)?,
            },
            database: DatabaseConfig {
                url: require("DATABASE_URL")?,
                max_connections: parse_or("DATABASE_MAX_CONNECTIONS", 10)?,
            },
            auth: AuthConfig { jwt_secret },
            provider: VideoProviderConfig {
                base_url: env::var("VIDEO_PROVIDER_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_PROVIDER_BASE_URL.to_string()),
                token_id: require("VIDEO_PROVIDER_TOKEN_ID")?,
                token_secret: require("VIDEO_PROVIDER_TOKEN_SECRET")?,
            },
        })
    }
}

fn require(key: &'static str) -> Result<String, ConfigError> {
    match env::var(key) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::Missing(key)),
    }
}

fn parse_or<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|e: T::Err| ConfigError::Invalid(key, e.to_string())),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env-var mutation is process-wide, so everything lives in one test.
    #[test]
    fn from_env_fails_closed_then_loads() {
        let vars = [
            ("DATABASE_URL", "postgres://localhost/decklive"),
            (
                "JWT_SECRET",
                "0123456789abcdef0123456789abcdef-long-enough",
            ),
            ("VIDEO_PROVIDER_TOKEN_ID", "token-id"),
            ("VIDEO_PROVIDER_TOKEN_SECRET", "token-secret"),
        ];
        for (k, _) in &vars {
            env::remove_var(k);
        }

        // No secrets at all: refuse to start.
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Missing("JWT_SECRET"))
        ));

        // A short signing secret is a misconfiguration, not a warning.
        env::set_var("JWT_SECRET", "short");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid("JWT_SECRET", _))
        ));

        for (k, v) in &vars {
            env::set_var(k, v);
        }
        let cfg = Config::from_env().expect("complete environment should load");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.database.max_connections, 10);
        assert_eq!(cfg.provider.base_url, DEFAULT_PROVIDER_BASE_URL);

        env::set_var("PORT", "not-a-port");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid("PORT", _))
        ));
        env::remove_var("PORT");
    }
}
