//! Configuration types

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::common::errors::{BotError, Result};
use crate::yahoo::VALID_RANGES;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Discord gateway configuration
    #[serde(default)]
    pub discord: DiscordConfig,
    /// Market data provider configuration
    #[serde(default)]
    pub provider: ProviderConfig,
    /// General application settings
    #[serde(default)]
    pub settings: AppSettings,
}

impl AppConfig {
    /// Bot token, failing when it is missing or blank
    pub fn require_token(&self) -> Result<&str> {
        match self.discord.token.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(BotError::Configuration(
                "No bot token configured; set the TOKEN environment variable".to_string(),
            )),
        }
    }

    /// Check everything the bot cannot start without
    pub fn validate(&self) -> Result<()> {
        self.require_token()?;

        if self.discord.prefix.trim().is_empty() {
            return Err(BotError::Configuration("Command prefix must not be empty".to_string()));
        }
        if self.settings.poll_interval_seconds == 0 {
            return Err(BotError::Configuration(
                "poll_interval_seconds must be greater than zero".to_string(),
            ));
        }
        if self.settings.alert_interval_seconds == 0 {
            return Err(BotError::Configuration(
                "alert_interval_seconds must be greater than zero".to_string(),
            ));
        }
        if !VALID_RANGES.contains(&self.settings.trend_range.as_str()) {
            return Err(BotError::Configuration(format!(
                "trend_range '{}' is not one of {}",
                self.settings.trend_range,
                VALID_RANGES.join(", ")
            )));
        }
        Ok(())
    }
}

/// Discord configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordConfig {
    /// Bot authentication token
    #[serde(default)]
    pub token: Option<String>,
    /// Prefix for text commands
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Role allowed to post announcements and trade calls
    #[serde(default = "default_executive_role")]
    pub executive_role: String,
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: None,
            prefix: default_prefix(),
            executive_role: default_executive_role(),
        }
    }
}

fn default_prefix() -> String {
    "!".to_string()
}

fn default_executive_role() -> String {
    "Executive".to_string()
}

/// Market data provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL for the Yahoo Finance chart API
    #[serde(default = "default_provider_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_provider_url(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_provider_url() -> String {
    "https://query1.finance.yahoo.com".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Seconds between price refreshes
    #[serde(default = "default_poll_interval")]
    pub poll_interval_seconds: u64,
    /// Seconds between alert scans
    #[serde(default = "default_alert_interval")]
    pub alert_interval_seconds: u64,
    /// Port of the liveness HTTP endpoint
    #[serde(default = "default_liveness_port")]
    pub liveness_port: u16,
    /// History window fetched for moving averages
    #[serde(default = "default_trend_range")]
    pub trend_range: String,
}

impl AppSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_seconds)
    }

    pub fn alert_interval(&self) -> Duration {
        Duration::from_secs(self.alert_interval_seconds)
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            poll_interval_seconds: default_poll_interval(),
            alert_interval_seconds: default_alert_interval(),
            liveness_port: default_liveness_port(),
            trend_range: default_trend_range(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_poll_interval() -> u64 {
    5
}

fn default_alert_interval() -> u64 {
    5
}

fn default_liveness_port() -> u16 {
    8080
}

fn default_trend_range() -> String {
    "max".to_string()
}
