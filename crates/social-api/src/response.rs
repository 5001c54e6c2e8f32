//! Response envelope and error types
//!
//! Success bodies are either `{"data": ...}` or the bare payload, failure
//! bodies carry `{"error": "..."}`.

use serde_json::Value;
use thiserror::Error;

/// No response arrived (DNS, connect, TLS, timeout, ...)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Failure of an API request as seen by callers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server was never reached
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status
    #[error("request failed ({status}): {message}")]
    Http { status: u16, message: String },
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        ApiError::Network(err.0)
    }
}

/// Raw response: status plus parsed JSON body (`Null` when empty or not JSON)
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub json: Value,
}

impl ApiResponse {
    pub fn new(status: u16, json: Value) -> Self {
        Self { status, json }
    }

    /// 2xx status
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Human readable failure message from the body, falling back to the status
    pub fn error_message(&self) -> String {
        ["error", "message"]
            .iter()
            .find_map(|key| self.json.get(key).and_then(Value::as_str))
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", self.status))
    }

    /// Unwrap the `data` envelope of a successful response
    pub fn into_data(self) -> Result<Value, ApiError> {
        if !self.is_ok() {
            return Err(ApiError::Http {
                status: self.status,
                message: self.error_message(),
            });
        }

        match self.json {
            Value::Object(mut map) if map.contains_key("data") => {
                Ok(map.remove("data").unwrap_or(Value::Null))
            }
            other => Ok(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_ok_range() {
        assert!(ApiResponse::new(200, Value::Null).is_ok());
        assert!(ApiResponse::new(201, Value::Null).is_ok());
        assert!(ApiResponse::new(204, Value::Null).is_ok());
        assert!(!ApiResponse::new(199, Value::Null).is_ok());
        assert!(!ApiResponse::new(404, Value::Null).is_ok());
    }

    #[test]
    fn test_bare_payload_is_passed_through() {
        let response = ApiResponse::new(200, json!([{"id": "n1"}]));
        assert_eq!(response.into_data().unwrap(), json!([{"id": "n1"}]));
    }

    #[test]
    fn test_error_message_fallbacks() {
        let with_error = ApiResponse::new(400, json!({"error": "post_id is required"}));
        assert_eq!(with_error.error_message(), "post_id is required");

        let with_message = ApiResponse::new(500, json!({"message": "boom"}));
        assert_eq!(with_message.error_message(), "boom");

        let empty = ApiResponse::new(502, Value::Null);
        assert_eq!(empty.error_message(), "HTTP 502");
    }

    #[test]
    fn test_transport_error_becomes_network_error() {
        let err: ApiError = TransportError::new("timed out").into();
        assert_eq!(err.to_string(), "network error: timed out");
    }
}
