//! Configuration and data directory paths
//!
//! Uses XDG directories via `dirs` crate with fallbacks.
//!
//! Platform-specific locations:
//! - Linux: `~/.config/social-feed/`, `~/.cache/social-feed/`
//! - macOS: `~/Library/Application Support/social-feed/`, `~/Library/Caches/social-feed/`
//! - Windows: `%APPDATA%\social-feed\`, `%LOCALAPPDATA%\social-feed\`

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "social-feed";
const LOCAL_SESSION_FILE: &str = ".social-feed.session.toml";

/// Get the application config directory
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    let dir = base.join(APP_NAME);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the application cache directory
pub fn cache_dir() -> Result<PathBuf> {
    let base = dirs::cache_dir().context("Could not determine cache directory")?;
    let dir = base.join(APP_NAME);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get path to global session file
pub fn global_session_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("session.toml"))
}

/// Get path to local session file (in CWD)
pub fn local_session_path() -> Result<PathBuf> {
    Ok(std::env::current_dir()?.join(LOCAL_SESSION_FILE))
}

/// Check if local session file exists
pub fn has_local_session() -> bool {
    local_session_path().map(|p| p.exists()).unwrap_or(false)
}
