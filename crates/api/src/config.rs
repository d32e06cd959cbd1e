use std::fmt;
use std::str::FromStr;

use axum::http::HeaderValue;
use climate_core::alert::{AlertThresholds, Band};

/// Configuration errors detected at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be a valid {expected}, got {value:?}")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development, except
/// `device_secrets`, which is empty (every device rejected) until configured.
#[derive(Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds, at least 1 (default: `30`).
    pub request_timeout_secs: u64,
    /// Accepted device secrets, parsed from comma-separated `DEVICE_SECRETS`.
    pub device_secrets: Vec<String>,
    /// Safe bands for the default alert evaluator.
    pub alert_thresholds: AlertThresholds,
}

// Secrets stay out of logs.
impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("cors_origins", &self.cors_origins)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("device_secrets", &format_args!("<{} redacted>", self.device_secrets.len()))
            .field("alert_thresholds", &self.alert_thresholds)
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `DEVICE_SECRETS`       | (empty)                    |
    /// | `TEMPERATURE_SAFE_MIN` | `10`                       |
    /// | `TEMPERATURE_SAFE_MAX` | `35`                       |
    /// | `HUMIDITY_SAFE_MIN`    | `25`                       |
    /// | `HUMIDITY_SAFE_MAX`    | `75`                       |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or(&lookup, "PORT", "u16", 3000)?;

        let cors_origins = split_list(
            &lookup("CORS_ORIGINS").unwrap_or_else(|| "http://localhost:5173".into()),
        );
        for origin in &cors_origins {
            if HeaderValue::from_str(origin).is_err() {
                return Err(ConfigError::Invalid {
                    key: "CORS_ORIGINS",
                    expected: "header value",
                    value: origin.clone(),
                });
            }
        }

        let request_timeout_secs = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", "u64", 30)?;
        // A zero timeout would fail every request.
        if request_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "REQUEST_TIMEOUT_SECS",
                expected: "positive u64",
                value: "0".into(),
            });
        }

        let device_secrets = lookup("DEVICE_SECRETS")
            .map(|raw| split_list(&raw))
            .unwrap_or_default();

        let defaults = AlertThresholds::default();
        let alert_thresholds = AlertThresholds {
            temperature_safe: Band::new(
                parse_or(&lookup, "TEMPERATURE_SAFE_MIN", "f64", defaults.temperature_safe.min)?,
                parse_or(&lookup, "TEMPERATURE_SAFE_MAX", "f64", defaults.temperature_safe.max)?,
            ),
            humidity_safe: Band::new(
                parse_or(&lookup, "HUMIDITY_SAFE_MIN", "f64", defaults.humidity_safe.min)?,
                parse_or(&lookup, "HUMIDITY_SAFE_MAX", "f64", defaults.humidity_safe.max)?,
            ),
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            device_secrets,
            alert_thresholds,
        })
    }
}

fn parse_or<F, T>(
    lookup: &F,
    key: &'static str,
    expected: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            key,
            expected,
            value: raw,
        }),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
