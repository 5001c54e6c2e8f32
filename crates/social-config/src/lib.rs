//! Configuration and file management for social-feed
//!
//! This crate provides:
//! - File path utilities for config and cache files
//! - Configuration file loading (TOML)
//! - Application configuration (AppConfig)
//! - Persisted session (auth token) loading

pub mod app_config;
pub mod config_file;
pub mod paths;
pub mod session;

pub use app_config::{AppConfig, NotificationConfig, RealtimeConfig};
pub use config_file::load_config_file;
pub use paths::{cache_dir, config_dir};
pub use session::{Session, SessionData};
