use crate::retry::RetryConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::time::Duration;
use url::Url;
use vkapi_core::constants::{
    DEFAULT_API_VERSION, DEFAULT_BASE_DELAY_MS, DEFAULT_BASE_URL, DEFAULT_MAX_DELAY_MS,
    DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
use vkapi_core::error::{ConfigError, ErrorBuilder};
use vkapi_core::Result;

/// Retry table of the client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    /// Retries after the first attempt
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
    pub backoff_multiplier: f64,
    pub jitter: bool,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay_ms: DEFAULT_BASE_DELAY_MS,
            max_delay_ms: DEFAULT_MAX_DELAY_MS,
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }
}

/// Complete configuration for the API client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL the method name is appended to
    pub base_url: String,
    /// Sent as `v` with every call
    pub api_version: String,
    /// Sent as `lang` when set, e.g. `ru` or `en`
    pub language: Option<String>,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub retry: RetrySettings,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            language: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            retry: RetrySettings::default(),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `VKAPI_*` environment variables
    pub fn load() -> Result<Self> {
        let mut config = Self::default();
        config.load_from_env()?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| ErrorBuilder::config().malformed(e.to_string()))
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ErrorBuilder::internal(format!("Failed to serialize configuration: {e}")))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ErrorBuilder::config().unreadable(path.display().to_string(), e.to_string()))?;
        Self::from_toml(&content)
    }

    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = self.to_toml()?;
        std::fs::write(path.as_ref(), content).map_err(|e| {
            ErrorBuilder::internal(format!(
                "Failed to write {}: {e}",
                path.as_ref().display()
            ))
        })
    }

    fn load_from_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from a key lookup; keys are the `VKAPI_*` variable names
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup("VKAPI_BASE_URL") {
            self.base_url = base_url;
        }
        if let Some(version) = lookup("VKAPI_API_VERSION") {
            self.api_version = version;
        }
        if let Some(language) = lookup("VKAPI_LANG") {
            self.language = Some(language).filter(|l| !l.is_empty());
        }
        if let Some(timeout) = lookup("VKAPI_TIMEOUT_SECS") {
            self.timeout_secs = parse_field("VKAPI_TIMEOUT_SECS", &timeout)?;
        }
        if let Some(user_agent) = lookup("VKAPI_USER_AGENT") {
            self.user_agent = user_agent;
        }

        if let Some(retries) = lookup("VKAPI_MAX_RETRIES") {
            self.retry.max_retries = parse_field("VKAPI_MAX_RETRIES", &retries)?;
        }
        if let Some(delay) = lookup("VKAPI_RETRY_BASE_DELAY_MS") {
            self.retry.base_delay_ms = parse_field("VKAPI_RETRY_BASE_DELAY_MS", &delay)?;
        }
        if let Some(delay) = lookup("VKAPI_RETRY_MAX_DELAY_MS") {
            self.retry.max_delay_ms = parse_field("VKAPI_RETRY_MAX_DELAY_MS", &delay)?;
        }
        if let Some(jitter) = lookup("VKAPI_RETRY_JITTER") {
            self.retry.jitter = parse_field("VKAPI_RETRY_JITTER", &jitter)?;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| ConfigError::invalid_field("base_url", e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::invalid_field("base_url", "scheme must be http or https").into());
        }

        if self.api_version.is_empty() {
            return Err(ConfigError::missing_field("api_version").into());
        }
        if !self
            .api_version
            .split('.')
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()))
        {
            return Err(ConfigError::invalid_field(
                "api_version",
                format!("`{}` is not a dotted version number", self.api_version),
            )
            .into());
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::out_of_range("timeout_secs", "0", "greater than 0").into());
        }
        if self.user_agent.is_empty() {
            return Err(ConfigError::missing_field("user_agent").into());
        }

        let multiplier = self.retry.backoff_multiplier;
        if !(multiplier.is_finite() && multiplier >= 1.0) {
            return Err(ConfigError::out_of_range(
                "retry.backoff_multiplier",
                multiplier.to_string(),
                "a finite value of at least 1.0",
            )
            .into());
        }
        if self.retry.base_delay_ms > self.retry.max_delay_ms {
            return Err(ConfigError::out_of_range(
                "retry.base_delay_ms",
                self.retry.base_delay_ms.to_string(),
                format!("at most retry.max_delay_ms ({})", self.retry.max_delay_ms),
            )
            .into());
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig {
            max_retries: self.retry.max_retries,
            base_delay: Duration::from_millis(self.retry.base_delay_ms),
            max_delay: Duration::from_millis(self.retry.max_delay_ms),
            backoff_multiplier: self.retry.backoff_multiplier,
            jitter: self.retry.jitter,
        }
    }
}

fn parse_field<T: std::str::FromStr>(variable: &str, value: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ErrorBuilder::config().invalid_env(variable, value, e.to_string()))
}
