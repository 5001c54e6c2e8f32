//! HTTP implementation of [`ApiClient`] on top of reqwest

use crate::client::{ApiClient, Method};
use crate::response::{ApiError, ApiResponse, TransportError};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// API client talking to the real backend
///
/// Every request carries `Authorization: Bearer <token>` when a token is set.
#[derive(Debug, Clone)]
pub struct ReqwestApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ReqwestApiClient {
    /// Create a client for `base_url` (e.g. `https://example.com/api`)
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            token,
        })
    }

    /// Full URL for an API path
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn method(method: Method) -> reqwest::Method {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

#[async_trait]
impl ApiClient for ReqwestApiClient {
    async fn perform_request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<ApiResponse, TransportError> {
        let mut request = self.http.request(Self::method(method), self.url(path));
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::new(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::new(e.to_string()))?;

        let json = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or_else(|e| {
                log::warn!("{} {} returned a non-JSON body: {}", method, path, e);
                Value::Null
            })
        };

        Ok(ApiResponse::new(status, json))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slashes() {
        let client = ReqwestApiClient::new("http://localhost:3000/api/", None).unwrap();
        assert_eq!(client.url("/posts"), "http://localhost:3000/api/posts");
        assert_eq!(
            client.url("posts?limit=20"),
            "http://localhost:3000/api/posts?limit=20"
        );
    }

    #[test]
    fn test_method_mapping() {
        assert_eq!(ReqwestApiClient::method(Method::Put), reqwest::Method::PUT);
        assert_eq!(ReqwestApiClient::method(Method::Delete), reqwest::Method::DELETE);
    }
}
