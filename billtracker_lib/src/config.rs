//! Connection settings for the hosted database, read from the environment.

use std::time::Duration;

use billtracker_api::Client;

use crate::error::BillTrackerError;

pub const URL_VAR: &str = "BILLTRACKER_SUPABASE_URL";
pub const KEY_VAR: &str = "BILLTRACKER_SUPABASE_KEY";
pub const TIMEOUT_VAR: &str = "BILLTRACKER_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where and how to reach the hosted database.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    /// Project URL, e.g. `https://abc.supabase.co`.
    pub url: String,
    /// Anonymous (public) API key.
    pub api_key: String,
    pub timeout: Duration,
}

impl StoreConfig {
    pub fn new(url: &str, api_key: &str) -> Self {
        Self {
            url: url.to_string(),
            api_key: api_key.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Reads the configuration from `BILLTRACKER_*` environment variables.
    pub fn from_env() -> Result<Self, BillTrackerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BillTrackerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = required(&lookup, URL_VAR)?;
        let api_key = required(&lookup, KEY_VAR)?;
        let timeout_secs = lookup(TIMEOUT_VAR)
            .and_then(|val| val.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Ok(Self {
            url,
            api_key,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Creates a REST client for this configuration.
    pub fn client(&self) -> Client {
        Client::new(&self.url, &self.api_key).with_timeout(self.timeout)
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String, BillTrackerError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
        .ok_or_else(|| BillTrackerError::InvalidInput(format!("{} is not set", key)))
}
