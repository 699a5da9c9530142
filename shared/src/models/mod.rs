//! Domain models
//!
//! Shared between the API client and the POS app. Field names follow the
//! backend wire format (camelCase, MongoDB-style `_id`) via serde renames;
//! Rust-side names follow the domain language.

pub mod auth;
pub mod category;
pub mod menu;
pub mod order;

// Re-exports
pub use auth::*;
pub use category::*;
pub use menu::*;
pub use order::*;
