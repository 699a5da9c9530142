//! API Response types
//!
//! Every backend route wraps its payload in the same envelope:
//!
//! ```json
//! {
//!     "code": 200,
//!     "message": "Success",
//!     "data": { ... }
//! }
//! ```
//!
//! The auth routes spell the code field `statusCode`; the alias below
//! accepts both shapes on decode.

use serde::{Deserialize, Serialize};

/// Code returned on a successful request
pub const CODE_OK: u16 = 200;
/// Code returned when a resource was created (signup)
pub const CODE_CREATED: u16 = 201;

/// Unified API response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Numeric response code (2xx = success)
    #[serde(alias = "statusCode")]
    pub code: u16,
    /// Human-readable message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Response data (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn ok(data: T) -> Self {
        Self {
            code: CODE_OK,
            message: None,
            data: Some(data),
        }
    }

    /// Create an error response
    pub fn error(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: Some(message.into()),
            data: None,
        }
    }

    /// Whether the code is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
    }

    /// Consume the envelope, returning the message or a fallback
    pub fn message_or(self, fallback: &str) -> String {
        self.message.unwrap_or_else(|| fallback.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_decodes_code_field() {
        let resp: ApiResponse<Vec<Value>> =
            serde_json::from_str(r#"{"code": 200, "data": [], "message": "Success"}"#).unwrap();
        assert!(resp.is_success());
        assert_eq!(resp.data.unwrap().len(), 0);
    }

    #[test]
    fn test_decodes_status_code_alias() {
        let resp: ApiResponse<Value> =
            serde_json::from_str(r#"{"statusCode": 201, "message": "Created"}"#).unwrap();
        assert!(resp.is_success());
        assert_eq!(resp.code, 201);
    }

    #[test]
    fn test_error_is_not_success() {
        let resp: ApiResponse<Value> = ApiResponse::error(404, "Order not found");
        assert!(!resp.is_success());
        assert_eq!(resp.message_or("fallback"), "Order not found");
    }

    #[test]
    fn test_message_or_fallback_when_absent() {
        let resp: ApiResponse<Value> = serde_json::from_str(r#"{"code": 500}"#).unwrap();
        assert_eq!(resp.message_or("Something went wrong"), "Something went wrong");
    }
}
