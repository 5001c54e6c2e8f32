//! Error types surfaced by thunks and the realtime layer

use social_api::ApiError;
use std::collections::BTreeMap;
use thiserror::Error;

/// Failure of an async action
///
/// By the time a thunk returns this, any speculative change it made has been
/// reverted and the slice `error` has been set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThunkError {
    /// Input rejected before any network call
    #[error("{0}")]
    Validation(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("request failed ({status}): {message}")]
    Http { status: u16, message: String },

    /// The entity is not (or no longer) in the store
    #[error("not found: {0}")]
    NotFound(String),

    #[error("channel error: {0}")]
    Channel(String),

    /// A success response whose body did not have the expected shape
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ThunkError {
    /// Text stored in a slice's `error` field
    pub fn user_message(&self) -> String {
        match self {
            ThunkError::Http { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<ApiError> for ThunkError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Network(message) => ThunkError::Network(message),
            ApiError::Http { status, message } => ThunkError::Http { status, message },
        }
    }
}

impl From<serde_json::Error> for ThunkError {
    fn from(err: serde_json::Error) -> Self {
        ThunkError::Decode(err.to_string())
    }
}

impl From<ValidationErrors> for ThunkError {
    fn from(errors: ValidationErrors) -> Self {
        ThunkError::Validation(errors.to_string())
    }
}

impl From<ChannelError> for ThunkError {
    fn from(err: ChannelError) -> Self {
        ThunkError::Channel(err.to_string())
    }
}

/// Realtime channel failure; logged and retried, never stored in state
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    #[error("subscribe to {topic} failed: {reason}")]
    Subscribe { topic: String, reason: String },

    #[error("delivery failed: {0}")]
    Delivery(String),

    #[error("channel closed")]
    Closed,
}

/// Per-field validation messages, ordered by field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<&'static str, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<&str> = self.0.values().map(String::as_str).collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_conversion() {
        let err: ThunkError = ApiError::Http {
            status: 403,
            message: "Forbidden".to_string(),
        }
        .into();
        assert_eq!(err.user_message(), "Forbidden");

        let err: ThunkError = ApiError::Network("timeout".to_string()).into();
        assert_eq!(err, ThunkError::Network("timeout".to_string()));
    }

    #[test]
    fn test_validation_errors_keep_first_message_per_field() {
        let mut errors = ValidationErrors::new();
        errors.add("password", "too short");
        errors.add("password", "missing digit");
        errors.add("email", "invalid");
        assert_eq!(errors.get("password"), Some("too short"));
        assert_eq!(errors.to_string(), "invalid; too short");
    }
}
