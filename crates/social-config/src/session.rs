//! Session state persistence
//!
//! Holds the auth token the API client attaches to requests. The state core
//! only ever reads it; writing happens after an explicit login.
//!
//! # Precedence
//!
//! 1. `$CWD/.social-feed.session.toml` - Local session (highest priority)
//! 2. `~/.config/social-feed/session.toml` - Global session (fallback)
//!
//! On save: Use local file if it exists, otherwise use global.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::paths;

const SESSION_VERSION: u32 = 1;

/// Session metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionMeta {
    pub last_modified: DateTime<Utc>,
    pub version: u32,
}

/// Session data - the actual persisted state
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SessionData {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    /// Auth user id (not the community profile id)
    pub user_id: Option<String>,
    /// Community profile id, used as the realtime topic key
    pub profile_id: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Complete session with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub meta: SessionMeta,
    #[serde(default)]
    pub session: SessionData,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            meta: SessionMeta {
                last_modified: Utc::now(),
                version: SESSION_VERSION,
            },
            session: SessionData::default(),
        }
    }
}

impl Session {
    /// Load session with precedence: local > global > default
    pub fn load() -> Self {
        if paths::has_local_session() {
            if let Ok(path) = paths::local_session_path() {
                if let Ok(session) = Self::load_from_path(&path) {
                    log::info!("Loaded local session from {:?}", path);
                    return session;
                }
            }
        }

        if let Ok(path) = paths::global_session_path() {
            if path.exists() {
                if let Ok(session) = Self::load_from_path(&path) {
                    log::info!("Loaded global session from {:?}", path);
                    return session;
                }
            }
        }

        log::info!("No existing session found, using defaults");
        Self::default()
    }

    /// Load session from specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read session file: {:?}", path))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse session file: {:?}", path))
    }

    /// Save session (to local if exists, otherwise global)
    pub fn save(&mut self) -> Result<()> {
        let path = if paths::has_local_session() {
            paths::local_session_path()?
        } else {
            paths::global_session_path()?
        };

        self.save_to_path(&path)
    }

    /// Save session to specific path
    pub fn save_to_path(&mut self, path: &Path) -> Result<()> {
        self.meta.last_modified = Utc::now();
        let content = toml::to_string_pretty(self).context("Failed to serialize session")?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, content)
            .with_context(|| format!("Failed to write session file: {:?}", path))?;

        log::info!("Saved session to {:?}", path);
        Ok(())
    }

    /// Replace the stored credentials
    pub fn set_credentials(&mut self, data: SessionData) {
        self.session = data;
    }

    /// Forget every stored credential
    pub fn clear(&mut self) {
        self.session = SessionData::default();
    }

    /// Access token, unless it has expired at `now`
    pub fn access_token_at(&self, now: DateTime<Utc>) -> Option<&str> {
        if self.is_expired_at(now) {
            return None;
        }
        self.session.access_token.as_deref()
    }

    /// Access token, unless it has already expired
    pub fn access_token(&self) -> Option<&str> {
        self.access_token_at(Utc::now())
    }

    pub fn user_id(&self) -> Option<&str> {
        self.session.user_id.as_deref()
    }

    pub fn profile_id(&self) -> Option<&str> {
        self.session.profile_id.as_deref()
    }

    /// A session without expiry never expires
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.session
            .expires_at
            .map(|expires_at| expires_at <= now)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn credentials(expires_at: Option<DateTime<Utc>>) -> SessionData {
        SessionData {
            access_token: Some("token-123".to_string()),
            refresh_token: Some("refresh-456".to_string()),
            user_id: Some("user-1".to_string()),
            profile_id: Some("profile-1".to_string()),
            expires_at,
        }
    }

    #[test]
    fn test_default_session() {
        let session = Session::default();
        assert_eq!(session.meta.version, SESSION_VERSION);
        assert!(session.access_token().is_none());
        assert!(session.profile_id().is_none());
    }

    #[test]
    fn test_expired_token_is_hidden() {
        let now = Utc::now();
        let mut session = Session::default();
        session.set_credentials(credentials(Some(now - Duration::minutes(1))));

        assert!(session.is_expired_at(now));
        assert!(session.access_token_at(now).is_none());
        // ids stay readable, only the token is withheld
        assert_eq!(session.user_id(), Some("user-1"));
    }

    #[test]
    fn test_unexpired_token_is_returned() {
        let now = Utc::now();
        let mut session = Session::default();
        session.set_credentials(credentials(Some(now + Duration::hours(1))));
        assert_eq!(session.access_token_at(now), Some("token-123"));

        session.set_credentials(credentials(None));
        assert_eq!(session.access_token_at(now), Some("token-123"));
    }

    #[test]
    fn test_clear_forgets_credentials() {
        let mut session = Session::default();
        session.set_credentials(credentials(None));
        session.clear();
        assert_eq!(session.session, SessionData::default());
    }

    #[test]
    fn test_save_and_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.toml");

        let mut session = Session::default();
        session.set_credentials(credentials(None));
        session.save_to_path(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("[meta]"));
        assert!(content.contains("[session]"));

        let loaded = Session::load_from_path(&path).unwrap();
        assert_eq!(loaded.session, session.session);
        assert_eq!(loaded.profile_id(), Some("profile-1"));
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Session::load_from_path(&dir.path().join("missing.toml")).is_err());
    }
}
