//! Application configuration
//!
//! Configuration loaded from the .social-feed.toml file.

use serde::{Deserialize, Serialize};
use std::env;

/// Environment variable that overrides `api_base_url`
pub const API_URL_ENV: &str = "SOCIAL_FEED_API_URL";

/// Application configuration loaded from .social-feed.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL every API path is appended to (e.g. "https://example.com/api")
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Number of posts requested per feed page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Realtime channel behaviour
    #[serde(default)]
    pub realtime: RealtimeConfig,

    /// Notification alert behaviour
    #[serde(default)]
    pub notifications: NotificationConfig,
}

/// Realtime subscription settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RealtimeConfig {
    /// How often a failed subscription is retried before giving up
    #[serde(default = "default_resubscribe_attempts")]
    pub resubscribe_attempts: u32,

    /// Delay between resubscribe attempts, in milliseconds
    #[serde(default = "default_resubscribe_delay_ms")]
    pub resubscribe_delay_ms: u64,
}

/// Notification alert settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NotificationConfig {
    /// Play an alert when a new notification arrives
    #[serde(default = "default_sound_enabled")]
    pub sound_enabled: bool,
}

fn default_api_base_url() -> String {
    "http://localhost:3000/api".to_string()
}

fn default_page_size() -> u32 {
    20
}

fn default_resubscribe_attempts() -> u32 {
    3
}

fn default_resubscribe_delay_ms() -> u64 {
    1_000
}

fn default_sound_enabled() -> bool {
    true
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            resubscribe_attempts: default_resubscribe_attempts(),
            resubscribe_delay_ms: default_resubscribe_delay_ms(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            sound_enabled: default_sound_enabled(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            page_size: default_page_size(),
            realtime: RealtimeConfig::default(),
            notifications: NotificationConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load config from CWD first, then home directory, or use defaults
    ///
    /// `SOCIAL_FEED_API_URL` wins over whatever the file says.
    pub fn load() -> Self {
        let mut config = Self::from_file_or_default();
        if let Ok(url) = env::var(API_URL_ENV) {
            log::debug!("Using API base URL from {}", API_URL_ENV);
            config.api_base_url = url;
        }
        config
    }

    fn from_file_or_default() -> Self {
        if let Some(content) = crate::load_config_file() {
            match Self::parse(&content) {
                Ok(config) => {
                    log::info!("Loaded app config from file");
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse config file: {}", e);
                }
            }
        }

        log::debug!("Using default app config");
        Self::default()
    }

    /// Parse config from TOML text
    ///
    /// A zero page size is clamped to 1 so a feed request never asks for nothing.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(content)?;
        config.page_size = config.page_size.max(1);
        Ok(config)
    }
}
