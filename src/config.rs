// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment exactly once, in `main`,
//! into an [`AppConfig`] that is passed into [`crate::state::AppState`].
//! Nothing else in the crate reads environment variables.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `DATA_DIR` | Root directory for the document store | `/data` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `TOKEN_SECRET` | HS256 session token signing secret | Required |
//! | `TOKEN_TTL_DAYS` | Session token validity window in days | `7` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::env;
use std::path::PathBuf;

use chrono::Duration;

/// Environment variable name for the document store root directory.
pub const DATA_DIR_ENV: &str = "DATA_DIR";

/// Environment variable name for the bind address.
pub const HOST_ENV: &str = "HOST";

/// Environment variable name for the bind port.
pub const PORT_ENV: &str = "PORT";

/// Environment variable name for the session token signing secret.
pub const TOKEN_SECRET_ENV: &str = "TOKEN_SECRET";

/// Environment variable name for the token validity window (days).
pub const TOKEN_TTL_DAYS_ENV: &str = "TOKEN_TTL_DAYS";

/// Environment variable name for the log format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Default document store root.
pub const DEFAULT_DATA_DIR: &str = "/data";

/// Default session token validity window.
pub const DEFAULT_TOKEN_TTL_DAYS: i64 = 7;

/// Minimum accepted password length at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Configuration errors reported before the server binds.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("TOKEN_SECRET must be set to a non-empty value")]
    MissingTokenSecret,

    #[error("invalid PORT value: {0}")]
    InvalidPort(String),

    #[error("invalid TOKEN_TTL_DAYS value: {0}")]
    InvalidTokenTtl(String),
}

/// Process-wide configuration, immutable after startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server bind address.
    pub host: String,
    /// Server bind port.
    pub port: u16,
    /// Root directory for the document store.
    pub data_dir: PathBuf,
    /// HS256 signing secret for session tokens.
    pub token_secret: String,
    /// Session token validity window.
    pub token_ttl: Duration,
    /// Emit JSON-formatted logs instead of the human-readable format.
    pub log_json: bool,
}

impl AppConfig {
    /// Load configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let token_secret = env::var(TOKEN_SECRET_ENV)
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingTokenSecret)?;

        Ok(Self {
            host: env::var(HOST_ENV).unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_port(env::var(PORT_ENV).ok())?,
            data_dir: env::var(DATA_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR)),
            token_secret,
            token_ttl: parse_token_ttl(env::var(TOKEN_TTL_DAYS_ENV).ok())?,
            log_json: env::var(LOG_FORMAT_ENV)
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        })
    }
}

fn parse_port(raw: Option<String>) -> Result<u16, ConfigError> {
    match raw {
        Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw)),
        None => Ok(8080),
    }
}

fn parse_token_ttl(raw: Option<String>) -> Result<Duration, ConfigError> {
    match raw {
        Some(raw) => {
            let days: i64 = raw
                .parse()
                .map_err(|_| ConfigError::InvalidTokenTtl(raw.clone()))?;
            if days <= 0 {
                return Err(ConfigError::InvalidTokenTtl(raw));
            }
            Ok(Duration::days(days))
        }
        None => Ok(Duration::days(DEFAULT_TOKEN_TTL_DAYS)),
    }
}

#[cfg(test)]
impl AppConfig {
    /// Configuration for unit tests: fixed secret, default TTL, custom data dir.
    pub(crate) fn for_tests(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            data_dir: data_dir.into(),
            token_secret: "unit-test-signing-secret".to_string(),
            token_ttl: Duration::days(DEFAULT_TOKEN_TTL_DAYS),
            log_json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_defaults_when_unset() {
        assert_eq!(parse_port(None).unwrap(), 8080);
    }

    #[test]
    fn port_parses_valid_value() {
        assert_eq!(parse_port(Some("5000".to_string())).unwrap(), 5000);
    }

    #[test]
    fn port_rejects_garbage() {
        let result = parse_port(Some("not-a-port".to_string()));
        assert!(matches!(result, Err(ConfigError::InvalidPort(_))));
    }

    #[test]
    fn token_ttl_defaults_to_seven_days() {
        assert_eq!(parse_token_ttl(None).unwrap(), Duration::days(7));
    }

    #[test]
    fn token_ttl_parses_valid_value() {
        assert_eq!(
            parse_token_ttl(Some("30".to_string())).unwrap(),
            Duration::days(30)
        );
    }

    #[test]
    fn token_ttl_rejects_zero_and_negative() {
        assert!(matches!(
            parse_token_ttl(Some("0".to_string())),
            Err(ConfigError::InvalidTokenTtl(_))
        ));
        assert!(matches!(
            parse_token_ttl(Some("-3".to_string())),
            Err(ConfigError::InvalidTokenTtl(_))
        ));
    }
}
