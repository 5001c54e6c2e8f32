//! Network API collaborator for the social-feed client
//!
//! The state core never talks HTTP itself. It calls the [`ApiClient`] trait,
//! which any transport can implement:
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                ApiClient trait                   │
//! │  - perform_request(method, path, body)           │
//! │  - request(...)  → unwrapped `data` or ApiError  │
//! └─────────────────────────────────────────────────┘
//!                        │
//!        ┌───────────────┴───────────────┐
//!        ▼                               ▼
//! ┌─────────────────┐         ┌─────────────────────┐
//! │ ReqwestApiClient│         │ test doubles         │
//! │ (HTTP + bearer) │         │ (scripted responses) │
//! └─────────────────┘         └─────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use social_api::{ApiClient, Method, ReqwestApiClient, TokenResolver};
//!
//! # async fn example() -> Result<(), social_api::ApiError> {
//! let token = TokenResolver::new().resolve();
//! let client = ReqwestApiClient::new("http://localhost:3000/api", token)?;
//! let data = client.request(Method::Get, "/posts?limit=20", None).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod reqwest_client;
pub mod response;
pub mod token;

pub use client::{ApiClient, Method};
pub use reqwest_client::ReqwestApiClient;
pub use response::{ApiError, ApiResponse, TransportError};
pub use token::TokenResolver;
