//! HTTP client for the POS backend API
//!
//! One typed method per endpoint; every call attaches the bearer token
//! when one is set and surfaces the backend's `{code, message}` envelope
//! as a [`ClientError`] on failure. Nothing is retried or cached.

use crate::{ClientConfig, ClientError, ClientResult};
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::models::{
    CategoriesData, CategoryAdd, CategoryList, LoginRequest, LoginResponse, MenuItemCreate,
    MenuItemUpdate, MenuSection, Order, OrderCreate, OrderSummary, OrderUpdate, OrdersDelete,
    SignupRequest,
};
use shared::response::{ApiResponse, CODE_CREATED};

/// HTTP client for making network requests to the POS backend
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
        }
    }

    /// Set the authentication token
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Drop the authentication token (logout or 401)
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Get the current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Build the full URL for an API path
    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Build authorization header value
    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    /// Attach the bearer token when one is set
    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.auth_header() {
            Some(auth) => request.header(reqwest::header::AUTHORIZATION, auth),
            None => request,
        }
    }

    // ========== Request helpers ==========

    /// Make a GET request
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.authorized(self.client.get(self.url(path)));
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a GET request with query parameters
    async fn get_query<T: DeserializeOwned, Q: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<T> {
        let request = self.authorized(self.client.get(self.url(path)).query(query));
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.authorized(self.client.post(self.url(path)).json(body));
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a PUT request with JSON body
    async fn put<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.authorized(self.client.put(self.url(path)).json(body));
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a DELETE request without body
    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.authorized(self.client.delete(self.url(path)));
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a DELETE request with JSON body
    async fn delete_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.authorized(self.client.delete(self.url(path)).json(body));
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with a multipart form
    async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> ClientResult<T> {
        let request = self.authorized(self.client.post(self.url(path)).multipart(form));
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a PATCH request with a multipart form
    async fn patch_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> ClientResult<T> {
        let request = self.authorized(self.client.patch(self.url(path)).multipart(form));
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    ///
    /// Non-success statuses try to pull the backend's envelope message out
    /// of the body before falling back to the raw text.
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            let message = Self::envelope_message(&text)
                .unwrap_or_else(|| format!("Request failed ({})", status.as_u16()));
            tracing::warn!(status = status.as_u16(), %message, "API request failed");
            return match status {
                StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
                StatusCode::FORBIDDEN => Err(ClientError::Forbidden(message)),
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(message)),
                StatusCode::BAD_REQUEST => Err(ClientError::Validation(message)),
                _ => Err(ClientError::Api {
                    code: status.as_u16(),
                    message,
                }),
            };
        }

        response.json().await.map_err(Into::into)
    }

    /// Pull the `message` out of an envelope-shaped error body
    fn envelope_message(body: &str) -> Option<String> {
        let envelope: ApiResponse<serde_json::Value> = serde_json::from_str(body).ok()?;
        envelope.message
    }

    /// Unwrap a decoded envelope, surfacing a non-success code as an error
    fn unwrap_envelope<T>(envelope: ApiResponse<T>, missing: &str) -> ClientResult<T> {
        if !envelope.is_success() {
            let code = envelope.code;
            return Err(ClientError::Api {
                code,
                message: envelope.message_or("Something went wrong"),
            });
        }
        envelope
            .data
            .ok_or_else(|| ClientError::InvalidResponse(missing.to_string()))
    }

    // ========== Auth API ==========

    /// Login, returning the bearer token
    ///
    /// This route carries the token beside the status code rather than
    /// under `data`.
    pub async fn login(&self, request: &LoginRequest) -> ClientResult<String> {
        let response: LoginResponse = self.post("api/v1/auth/login", request).await?;
        if response.code != 200 {
            return Err(ClientError::Api {
                code: response.code,
                message: response
                    .message
                    .unwrap_or_else(|| "Login failed".to_string()),
            });
        }
        response
            .token
            .ok_or_else(|| ClientError::InvalidResponse("Missing login token".to_string()))
    }

    /// Create an account; success is 201
    pub async fn signup(&self, request: &SignupRequest) -> ClientResult<()> {
        let response: ApiResponse<serde_json::Value> =
            self.post("api/v1/auth/signup", request).await?;
        if response.code != CODE_CREATED {
            let code = response.code;
            return Err(ClientError::Api {
                code,
                message: response.message_or("Signup failed"),
            });
        }
        Ok(())
    }

    // ========== Menu API ==========

    /// Fetch the full menu, one section per category
    pub async fn fetch_menu(&self) -> ClientResult<Vec<MenuSection>> {
        let response: ApiResponse<Vec<MenuSection>> = self.get("api/v1/menu").await?;
        Self::unwrap_envelope(response, "Missing menu data")
    }

    /// Add a dish to the menu (multipart form)
    pub async fn add_menu_item(&self, item: &MenuItemCreate) -> ClientResult<()> {
        let form = reqwest::multipart::Form::new()
            .text("categoryName", item.category_name.clone())
            .text("dishName", item.dish_name.clone())
            .text("price", item.price.to_string());
        let response: ApiResponse<serde_json::Value> =
            self.post_multipart("api/v1/menu/add-item", form).await?;
        Self::unwrap_envelope(response, "Missing response data").map(|_| ())
    }

    /// Update a dish's name and price (multipart form)
    pub async fn update_menu_item(&self, id: &str, item: &MenuItemUpdate) -> ClientResult<()> {
        let form = reqwest::multipart::Form::new()
            .text("dishName", item.dish_name.clone())
            .text("price", item.price.to_string());
        let path = format!("api/v1/menu/items/{}", id);
        let response: ApiResponse<serde_json::Value> = self.patch_multipart(&path, form).await?;
        Self::unwrap_envelope(response, "Missing response data").map(|_| ())
    }

    /// Remove a dish from the menu
    pub async fn delete_menu_item(&self, id: &str) -> ClientResult<()> {
        let path = format!("api/v1/menu/items/{}", id);
        let response: ApiResponse<serde_json::Value> = self.delete(&path).await?;
        Self::unwrap_envelope(response, "Missing response data").map(|_| ())
    }

    // ========== Category API ==========

    /// Fetch the category lists
    pub async fn fetch_categories(&self) -> ClientResult<Vec<CategoryList>> {
        let response: ApiResponse<CategoriesData> = self.get("api/v1/categories").await?;
        Self::unwrap_envelope(response, "Missing category data").map(|data| data.categories)
    }

    /// Create the category list with an initial name
    pub async fn add_category(&self, name: &str) -> ClientResult<()> {
        let payload = CategoryAdd {
            categories: vec![name.to_string()],
        };
        let response: ApiResponse<serde_json::Value> =
            self.post("api/v1/categories/list", &payload).await?;
        Self::unwrap_envelope(response, "Missing response data").map(|_| ())
    }

    /// Append a name to an existing category list
    pub async fn push_category(&self, list_id: &str, name: &str) -> ClientResult<()> {
        let payload = CategoryAdd {
            categories: vec![name.to_string()],
        };
        let path = format!("api/v1/categories/list/{}", list_id);
        let response: ApiResponse<serde_json::Value> = self.post(&path, &payload).await?;
        Self::unwrap_envelope(response, "Missing response data").map(|_| ())
    }

    /// Remove a name from a category list
    pub async fn delete_category(&self, list_id: &str, name: &str) -> ClientResult<()> {
        let payload = shared::models::CategoryRemove {
            category: name.to_string(),
        };
        let path = format!("api/v1/categories/list/{}", list_id);
        let response: ApiResponse<serde_json::Value> = self.delete_json(&path, &payload).await?;
        Self::unwrap_envelope(response, "Missing response data").map(|_| ())
    }

    // ========== Order API ==========

    /// Submit a paid receipt as a persisted order
    pub async fn create_order(&self, order: &OrderCreate) -> ClientResult<Order> {
        tracing::debug!(table = %order.table, total = order.final_total, "creating order");
        let response: ApiResponse<Order> = self.post("api/v1/orders", order).await?;
        Self::unwrap_envelope(response, "Missing order data")
    }

    /// Fetch a single order by id
    pub async fn fetch_order(&self, id: &str) -> ClientResult<Order> {
        let path = format!("api/v1/orders/{}", id);
        let response: ApiResponse<Order> = self.get(&path).await?;
        Self::unwrap_envelope(response, "Missing order data")
    }

    /// Save edited items and totals back to an order
    pub async fn update_order(&self, id: &str, update: &OrderUpdate) -> ClientResult<Order> {
        let path = format!("api/v1/orders/{}", id);
        let response: ApiResponse<Order> = self.put(&path, update).await?;
        Self::unwrap_envelope(response, "Missing order data")
    }

    /// Fetch order summaries between two dates (inclusive)
    pub async fn fetch_orders_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ClientResult<Vec<OrderSummary>> {
        let query = [
            ("startDate", start.format("%Y-%m-%d").to_string()),
            ("endDate", end.format("%Y-%m-%d").to_string()),
        ];
        let response: ApiResponse<Vec<OrderSummary>> =
            self.get_query("api/v1/orders/range", &query).await?;
        Self::unwrap_envelope(response, "Missing order data")
    }

    /// Delete a batch of orders by id
    pub async fn delete_orders(&self, ids: Vec<String>) -> ClientResult<()> {
        let payload = OrdersDelete { ids };
        let response: ApiResponse<serde_json::Value> =
            self.delete_json("api/v1/orders", &payload).await?;
        Self::unwrap_envelope(response, "Missing response data").map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining_handles_slashes() {
        let client = ClientConfig::new("http://localhost:4000/").build_http_client();
        assert_eq!(client.url("/api/v1/menu"), "http://localhost:4000/api/v1/menu");
        assert_eq!(client.url("api/v1/menu"), "http://localhost:4000/api/v1/menu");
    }

    #[test]
    fn test_auth_header_requires_token() {
        let mut client = ClientConfig::new("http://localhost:4000").build_http_client();
        assert!(client.auth_header().is_none());

        client.set_token("jwt-abc");
        assert_eq!(client.auth_header().as_deref(), Some("Bearer jwt-abc"));

        client.clear_token();
        assert!(client.auth_header().is_none());
    }

    #[test]
    fn test_envelope_message_extraction() {
        let body = r#"{"code": 404, "message": "Order not found"}"#;
        assert_eq!(
            HttpClient::envelope_message(body).as_deref(),
            Some("Order not found")
        );
        assert!(HttpClient::envelope_message("not json").is_none());
        assert!(HttpClient::envelope_message(r#"{"code": 500}"#).is_none());
    }

    #[test]
    fn test_unwrap_envelope_surfaces_error_codes() {
        let envelope: ApiResponse<u32> = ApiResponse::error(500, "boom");
        let err = HttpClient::unwrap_envelope(envelope, "missing").unwrap_err();
        match err {
            ClientError::Api { code, message } => {
                assert_eq!(code, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("unexpected error: {other}"),
        }

        let ok: ApiResponse<u32> = ApiResponse::ok(7);
        assert_eq!(HttpClient::unwrap_envelope(ok, "missing").unwrap(), 7);
    }
}
