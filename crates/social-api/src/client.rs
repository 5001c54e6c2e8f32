//! API client trait
//!
//! Defines the single request primitive the state core depends on.

use crate::response::{ApiError, ApiResponse, TransportError};
use async_trait::async_trait;
use serde_json::Value;

/// HTTP method subset used by the social API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Social API client trait
///
/// Implementations can hit the real backend or replay scripted responses.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so thunks can hold them across
/// `.await` points on any runtime worker.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Perform one request
    ///
    /// # Arguments
    ///
    /// * `method` - HTTP method
    /// * `path` - Path relative to the API base, including any query string
    /// * `body` - Optional JSON body
    ///
    /// # Returns
    ///
    /// The response whatever its status, or a [`TransportError`] when no
    /// response arrived at all.
    async fn perform_request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<ApiResponse, TransportError>;

    /// Perform a request and unwrap the success payload
    ///
    /// Non-2xx statuses become [`ApiError::Http`], transport failures
    /// become [`ApiError::Network`].
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        log::debug!("{} {}", method, path);
        let response = self.perform_request(method, path, body).await?;
        response.into_data()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    /// Mock client replaying one canned response
    struct MockClient {
        response: Result<ApiResponse, TransportError>,
        calls: Arc<Mutex<Vec<(Method, String)>>>,
    }

    #[async_trait]
    impl ApiClient for MockClient {
        async fn perform_request(
            &self,
            method: Method,
            path: &str,
            _body: Option<Value>,
        ) -> Result<ApiResponse, TransportError> {
            self.calls.lock().unwrap().push((method, path.to_string()));
            self.response.clone()
        }
    }

    #[tokio::test]
    async fn test_request_unwraps_data_envelope() {
        let client = MockClient {
            response: Ok(ApiResponse::new(200, json!({"data": {"id": "p1"}}))),
            calls: Arc::new(Mutex::new(Vec::new())),
        };

        let data = client.request(Method::Get, "/posts/p1", None).await.unwrap();
        assert_eq!(data, json!({"id": "p1"}));
        assert_eq!(
            client.calls.lock().unwrap().as_slice(),
            &[(Method::Get, "/posts/p1".to_string())]
        );
    }

    #[tokio::test]
    async fn test_request_maps_http_failure() {
        let client = MockClient {
            response: Ok(ApiResponse::new(403, json!({"error": "Not allowed"}))),
            calls: Arc::new(Mutex::new(Vec::new())),
        };

        let err = client.request(Method::Delete, "/posts/p1", None).await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Http {
                status: 403,
                message: "Not allowed".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_request_maps_transport_failure() {
        let client = MockClient {
            response: Err(TransportError::new("connection refused")),
            calls: Arc::new(Mutex::new(Vec::new())),
        };

        let err = client.request(Method::Get, "/posts", None).await.unwrap_err();
        assert_eq!(err, ApiError::Network("connection refused".to_string()));
    }

    #[test]
    fn test_method_display() {
        assert_eq!(Method::Delete.to_string(), "DELETE");
    }
}
