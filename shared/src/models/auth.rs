//! Auth API DTOs

use serde::{Deserialize, Serialize};

/// Shop types offered during signup
pub const SHOP_TYPES: &[&str] = &[
    "Retail Store",
    "Restaurant",
    "Grocery Store",
    "Fashion & Clothing",
    "Electronics Store",
    "Pharmacy",
    "Other",
];

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub phone_number: String,
    pub password: String,
}

/// Login response
///
/// The token rides beside the status code on this route instead of
/// under `data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(alias = "statusCode")]
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Signup request
///
/// The backend mixes snake_case and camelCase on this route; keep the
/// renames exactly as consumed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub phone_number: String,
    pub password: String,
    pub confirm_password: String,
    #[serde(rename = "shopName")]
    pub shop_name: String,
    #[serde(rename = "shopType")]
    pub shop_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_decodes_top_level_token() {
        let json = r#"{"statusCode": 200, "token": "jwt-abc"}"#;
        let res: LoginResponse = serde_json::from_str(json).unwrap();
        assert_eq!(res.code, 200);
        assert_eq!(res.token.as_deref(), Some("jwt-abc"));
        assert!(res.message.is_none());
    }

    #[test]
    fn test_signup_request_wire_names() {
        let req = SignupRequest {
            phone_number: "555123".to_string(),
            password: "pw".to_string(),
            confirm_password: "pw".to_string(),
            shop_name: "Reef Diner".to_string(),
            shop_type: "Restaurant".to_string(),
        };

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["phone_number"], "555123");
        assert_eq!(json["confirm_password"], "pw");
        assert_eq!(json["shopName"], "Reef Diner");
        assert_eq!(json["shopType"], "Restaurant");
    }
}
