//! Reef Client - HTTP client for the POS backend
//!
//! Typed request/response calls against the restaurant REST API: auth,
//! menu, categories, and orders. Attaches the bearer token, maps error
//! statuses, and persists the token on disk. No retries, no caching.

pub mod config;
pub mod credential;
pub mod error;
pub mod http;

pub use config::ClientConfig;
pub use credential::{StoredToken, TokenStore};
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;

// Re-export shared types for convenience
pub use shared::response::ApiResponse;
