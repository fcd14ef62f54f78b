//! Runtime configuration, read from the environment (and a `.env` file when present).
//!
//! | Variable | Default |
//! |----------|---------|
//! | `STOREFRONT_API_BASE` | `http://localhost:5000/api` |
//! | `STOREFRONT_API_TOKEN` | unset |
//! | `STOREFRONT_TIMEOUT_SECS` | `30` |
//! | `STOREFRONT_DEFAULT_COUNTRY` | `Pakistan` |
//! | `STOREFRONT_STALE_RESPONSES` | `apply` (or `discard`) |
//! | `STOREFRONT_CHANNEL_BUFFER` | `32` |

use crate::error::StorefrontError;
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;
use store_framework::StaleResponsePolicy;

#[derive(Debug, Clone, PartialEq)]
pub struct StorefrontConfig {
    pub api_base: String,
    pub api_token: Option<String>,
    pub timeout: Duration,
    pub default_country: String,
    pub stale_responses: StaleResponsePolicy,
    pub channel_buffer: usize,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            api_base: "http://localhost:5000/api".to_string(),
            api_token: None,
            timeout: Duration::from_secs(30),
            default_country: "Pakistan".to_string(),
            stale_responses: StaleResponsePolicy::Apply,
            channel_buffer: 32,
        }
    }
}

impl StorefrontConfig {
    pub fn from_env() -> Result<Self, StorefrontError> {
        dotenv().ok();
        let config = Self::from_lookup(|key| env::var(key).ok())?;
        tracing::info!(api_base = %config.api_base, "Configuration loaded");
        Ok(config)
    }

    /// Builds a config from any key lookup; unset keys take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, StorefrontError> {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let timeout_secs = parse_or(
            get("STOREFRONT_TIMEOUT_SECS"),
            "STOREFRONT_TIMEOUT_SECS",
            defaults.timeout.as_secs(),
        )?;
        let channel_buffer = parse_or(
            get("STOREFRONT_CHANNEL_BUFFER"),
            "STOREFRONT_CHANNEL_BUFFER",
            defaults.channel_buffer,
        )?;
        if channel_buffer == 0 {
            return Err(StorefrontError::Config(
                "STOREFRONT_CHANNEL_BUFFER must be at least 1".to_string(),
            ));
        }

        let stale_responses = match get("STOREFRONT_STALE_RESPONSES").as_deref() {
            None | Some("apply") => StaleResponsePolicy::Apply,
            Some("discard") => StaleResponsePolicy::Discard,
            Some(other) => {
                return Err(StorefrontError::Config(format!(
                    "Invalid STOREFRONT_STALE_RESPONSES value '{other}', \
                     expected 'apply' or 'discard'"
                )))
            }
        };

        Ok(Self {
            api_base: get("STOREFRONT_API_BASE").unwrap_or(defaults.api_base),
            api_token: get("STOREFRONT_API_TOKEN"),
            timeout: Duration::from_secs(timeout_secs),
            default_country: get("STOREFRONT_DEFAULT_COUNTRY").unwrap_or(defaults.default_country),
            stale_responses,
            channel_buffer,
        })
    }
}

fn parse_or<T>(value: Option<String>, key: &str, default: T) -> Result<T, StorefrontError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| StorefrontError::Config(format!("Invalid {key}: {e}"))),
        None => Ok(default),
    }
}
