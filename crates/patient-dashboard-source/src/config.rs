//! Request configuration for the user-data source.
//!
//! Resolved once at startup and handed to the client. Environment variables
//! are only read by [`SourceConfig::from_env`]; everything else takes explicit
//! values so tests never depend on process state.

use crate::{SourceError, SourceResult};

/// Default endpoint of the demo user API.
pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com/users";

/// Number of users requested by default.
pub const DEFAULT_LIMIT: u32 = 50;

/// Largest page the demo API will serve.
pub const MAX_LIMIT: u32 = 100;

/// Request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Fields requested from the API. Anything else in a user record is unused.
pub const DEFAULT_SELECT: &[&str] = &[
    "id",
    "firstName",
    "lastName",
    "age",
    "gender",
    "email",
    "phone",
    "birthDate",
    "image",
    "bloodGroup",
    "height",
    "weight",
    "address",
    "company",
];

/// Environment variable overriding the base URL.
pub const ENV_SOURCE_URL: &str = "PATIENT_SOURCE_URL";

/// Environment variable overriding the request limit.
pub const ENV_SOURCE_LIMIT: &str = "PATIENT_SOURCE_LIMIT";

/// Source configuration resolved at startup.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceConfig {
    base_url: String,
    limit: u32,
    select: Vec<String>,
    timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            limit: DEFAULT_LIMIT,
            select: DEFAULT_SELECT.iter().map(|s| s.to_string()).collect(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl SourceConfig {
    /// Create a new `SourceConfig`.
    pub fn new(
        base_url: String,
        limit: u32,
        select: Vec<String>,
        timeout_secs: u64,
    ) -> SourceResult<Self> {
        let base_url = base_url.trim().to_string();
        if base_url.is_empty() {
            return Err(SourceError::Config("base URL cannot be empty".into()));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(SourceError::Config(format!(
                "base URL must start with http:// or https://, got {}",
                base_url
            )));
        }
        if limit == 0 || limit > MAX_LIMIT {
            return Err(SourceError::Config(format!(
                "limit must be between 1 and {}, got {}",
                MAX_LIMIT, limit
            )));
        }
        if timeout_secs == 0 {
            return Err(SourceError::Config("timeout must be non-zero".into()));
        }

        Ok(Self {
            base_url,
            limit,
            select,
            timeout_secs,
        })
    }

    /// Resolve configuration from optional raw values.
    ///
    /// `None` or blank values fall back to the defaults. A limit that does not
    /// parse as an integer is an error rather than silently ignored.
    pub fn from_env_values(url: Option<String>, limit: Option<String>) -> SourceResult<Self> {
        let defaults = Self::default();

        let url = url
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.base_url);

        let limit = match limit.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            Some(raw) => raw.parse::<u32>().map_err(|_| {
                SourceError::Config(format!("{} is not a valid integer: {}", ENV_SOURCE_LIMIT, raw))
            })?,
            None => defaults.limit,
        };

        Self::new(url, limit, defaults.select, defaults.timeout_secs)
    }

    /// Resolve configuration from the process environment (and `.env`, if present).
    pub fn from_env() -> SourceResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_env_values(
            std::env::var(ENV_SOURCE_URL).ok(),
            std::env::var(ENV_SOURCE_LIMIT).ok(),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn select(&self) -> &[String] {
        &self.select
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    /// Full request URL with the limit and field selection.
    pub fn request_url(&self) -> String {
        let mut url = format!("{}?limit={}", self.base_url, self.limit);
        if !self.select.is_empty() {
            url.push_str("&select=");
            url.push_str(&self.select.join(","));
        }
        url
    }
}
