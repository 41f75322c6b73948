use std::env;
use std::str::FromStr;
use std::time::Duration;

use log::LevelFilter;

use crate::error::{DiscoveryError, Result};

pub const API_KEY_VAR: &str = "GOOGLE_PLACES_API_KEY";

#[derive(Debug, Clone)]
pub struct Settings {
    pub google_api_key: String,
    pub bind_address: String,
    pub rate_limit_replenish_secs: u64,
    pub rate_limit_burst: u32,
    pub request_timeout: Duration,
    pub log_dir: String,
    pub log_level: LevelFilter,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let google_api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| DiscoveryError::Configuration(format!("{} must be set", API_KEY_VAR)))?;

        Ok(Self {
            google_api_key,
            bind_address: lookup("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:9999".to_string()),
            rate_limit_replenish_secs: parse_or(&lookup, "RATE_LIMIT_REPLENISH_SECS", 5)?,
            rate_limit_burst: parse_or(&lookup, "RATE_LIMIT_BURST", 10)?,
            request_timeout: Duration::from_secs(parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 10)?),
            log_dir: lookup("LOG_DIR").unwrap_or_else(|| "logs".to_string()),
            log_level: parse_or(&lookup, "LOG_LEVEL", LevelFilter::Info)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| DiscoveryError::Configuration(format!("{} has an invalid value: {:?}", key, raw))),
    }
}
