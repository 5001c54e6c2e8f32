//! Access token resolution
//!
//! Tries multiple sources in order:
//! 1. `SOCIAL_FEED_TOKEN` env var
//! 2. `SOCIAL_FEED_TOKEN` from a `.env` file
//! 3. The persisted session file (skipped when expired)

use social_config::Session;

/// Env var consulted before the session file
pub const TOKEN_ENV: &str = "SOCIAL_FEED_TOKEN";

/// Resolves the bearer token handed to the API client
#[derive(Debug, Clone, Default)]
pub struct TokenResolver {
    /// Token from the environment, captured at construction
    env_token: Option<String>,
}

impl TokenResolver {
    /// Create a resolver, loading `.env` when the env var is not set
    pub fn new() -> Self {
        if std::env::var(TOKEN_ENV).is_err() {
            match dotenvy::dotenv() {
                Ok(path) => log::debug!("Loaded .env file from: {:?}", path),
                Err(_) => log::debug!(".env file not found, relying on environment"),
            }
        }

        Self {
            env_token: std::env::var(TOKEN_ENV).ok().filter(|t| !t.is_empty()),
        }
    }

    /// Resolve against the persisted session on disk
    pub fn resolve(&self) -> Option<String> {
        self.resolve_with(&Session::load())
    }

    /// Resolve against a given session
    pub fn resolve_with(&self, session: &Session) -> Option<String> {
        if let Some(ref token) = self.env_token {
            log::debug!("Using token from {}", TOKEN_ENV);
            return Some(token.clone());
        }

        match session.access_token() {
            Some(token) => {
                log::debug!("Using token from persisted session");
                Some(token.to_string())
            }
            None => {
                log::debug!("No access token available");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use social_config::SessionData;

    fn session_with_token(token: &str) -> Session {
        let mut session = Session::default();
        session.set_credentials(SessionData {
            access_token: Some(token.to_string()),
            ..SessionData::default()
        });
        session
    }

    #[test]
    fn test_env_token_wins_over_session() {
        let resolver = TokenResolver {
            env_token: Some("from-env".to_string()),
        };
        assert_eq!(
            resolver.resolve_with(&session_with_token("from-session")),
            Some("from-env".to_string())
        );
    }

    #[test]
    fn test_session_token_used_without_env() {
        let resolver = TokenResolver { env_token: None };
        assert_eq!(
            resolver.resolve_with(&session_with_token("from-session")),
            Some("from-session".to_string())
        );
        assert_eq!(resolver.resolve_with(&Session::default()), None);
    }
}
