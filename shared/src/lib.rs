//! Shared types for the Reef POS suite
//!
//! Domain models, the cart and order-edit aggregates, money arithmetic,
//! and the API response envelope used by both the client crate and the
//! terminal app. This crate performs no I/O.

pub mod cart;
pub mod models;
pub mod money;
pub mod response;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use cart::{CartStore, OrderEditor, TableCart};
pub use response::ApiResponse;
