//! Order Model

use serde::{Deserialize, Serialize};

/// Service tag on a cart or order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum OrderType {
    #[default]
    #[serde(rename = "Dine In")]
    DineIn,
    #[serde(rename = "Take Away")]
    TakeAway,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::DineIn => "Dine In",
            OrderType::TakeAway => "Take Away",
        }
    }

    /// Flip between the two service tags (receipt screen toggle)
    pub fn toggle(&self) -> Self {
        match self {
            OrderType::DineIn => OrderType::TakeAway,
            OrderType::TakeAway => OrderType::DineIn,
        }
    }
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment method
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PaymentType {
    #[default]
    Cash,
    Card,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::Cash => "Cash",
            PaymentType::Card => "Card",
        }
    }
}

impl std::fmt::Display for PaymentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One dish line on a cart or order
///
/// Identity key is `dish_name`; a line never persists at quantity 0.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub dish_name: String,
    /// Price in currency unit
    pub price: f64,
    pub quantity: i32,
}

impl LineItem {
    pub fn new(dish_name: impl Into<String>, price: f64, quantity: i32) -> Self {
        Self {
            dish_name: dish_name.into(),
            price,
            quantity,
        }
    }
}

/// Order entity (persisted order as returned by the backend)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,
    pub table: String,
    #[serde(default)]
    pub order_type: OrderType,
    #[serde(rename = "orders", default)]
    pub items: Vec<LineItem>,
    /// Tax rate as a fraction (0.05 = 5%)
    #[serde(rename = "tax")]
    pub tax_rate: f64,
    /// Sum of line totals in currency unit
    #[serde(rename = "totalPrice")]
    pub subtotal: f64,
    /// Subtotal plus tax in currency unit
    #[serde(rename = "finalPrice")]
    pub final_total: f64,
    #[serde(default)]
    pub payment_type: PaymentType,
    /// Amount tendered in currency unit
    #[serde(rename = "paidPrice", default)]
    pub paid_amount: f64,
    /// Tendered minus final total (negative when underpaid)
    #[serde(rename = "extraChange", default)]
    pub change: f64,
    pub created_at: Option<String>,
}

/// Range-query row (order list screen)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub created_at: String,
    #[serde(rename = "finalPrice")]
    pub final_total: f64,
}

/// Create order payload (payment submission)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    pub table: String,
    /// Tax rate as a fraction (0.05 = 5%)
    #[serde(rename = "tax")]
    pub tax_rate: f64,
    pub order_type: OrderType,
    pub payment_type: PaymentType,
    #[serde(rename = "orders")]
    pub items: Vec<LineItem>,
    #[serde(rename = "totalPrice")]
    pub subtotal: f64,
    #[serde(rename = "finalPrice")]
    pub final_total: f64,
    #[serde(rename = "paidPrice")]
    pub paid_amount: f64,
    #[serde(rename = "extraChange")]
    pub change: f64,
}

/// Update order payload (item edits after submission)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderUpdate {
    #[serde(rename = "orders")]
    pub items: Vec<LineItem>,
    /// Tax rate as a fraction (0.05 = 5%)
    #[serde(rename = "tax")]
    pub tax_rate: f64,
    #[serde(rename = "totalPrice")]
    pub subtotal: f64,
    #[serde(rename = "finalPrice")]
    pub final_total: f64,
}

/// Bulk delete payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdersDelete {
    pub ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_type_wire_strings() {
        let json = serde_json::to_string(&OrderType::DineIn).unwrap();
        assert_eq!(json, "\"Dine In\"");
        let json = serde_json::to_string(&OrderType::TakeAway).unwrap();
        assert_eq!(json, "\"Take Away\"");

        let parsed: OrderType = serde_json::from_str("\"Take Away\"").unwrap();
        assert_eq!(parsed, OrderType::TakeAway);
    }

    #[test]
    fn test_order_type_defaults_to_dine_in() {
        assert_eq!(OrderType::default(), OrderType::DineIn);
        assert_eq!(OrderType::DineIn.toggle(), OrderType::TakeAway);
        assert_eq!(OrderType::TakeAway.toggle(), OrderType::DineIn);
    }

    #[test]
    fn test_line_item_wire_names() {
        let item = LineItem::new("Fries", 3.5, 2);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["dishName"], "Fries");
        assert_eq!(json["price"], 3.5);
        assert_eq!(json["quantity"], 2);
    }

    #[test]
    fn test_order_decodes_backend_shape() {
        let json = r#"{
            "_id": "68a1",
            "table": "3",
            "orderType": "Dine In",
            "orders": [{"dishName": "Burger", "price": 8.0, "quantity": 1}],
            "tax": 0.05,
            "totalPrice": 8.0,
            "finalPrice": 8.4,
            "paymentType": "Cash",
            "paidPrice": 10.0,
            "extraChange": 1.6,
            "createdAt": "2025-03-01T12:30:00.000Z"
        }"#;

        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.id, "68a1");
        assert_eq!(order.table, "3");
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.tax_rate, 0.05);
        assert_eq!(order.final_total, 8.4);
        assert_eq!(order.payment_type, PaymentType::Cash);
        assert_eq!(order.change, 1.6);
    }

    #[test]
    fn test_order_create_wire_names() {
        let payload = OrderCreate {
            table: "5".to_string(),
            tax_rate: 0.05,
            order_type: OrderType::TakeAway,
            payment_type: PaymentType::Cash,
            items: vec![LineItem::new("Cola", 2.0, 3)],
            subtotal: 6.0,
            final_total: 6.3,
            paid_amount: 10.0,
            change: 3.7,
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["table"], "5");
        assert_eq!(json["tax"], 0.05);
        assert_eq!(json["orderType"], "Take Away");
        assert_eq!(json["paymentType"], "Cash");
        assert_eq!(json["orders"][0]["dishName"], "Cola");
        assert_eq!(json["totalPrice"], 6.0);
        assert_eq!(json["finalPrice"], 6.3);
        assert_eq!(json["paidPrice"], 10.0);
        assert_eq!(json["extraChange"], 3.7);
    }
}
