//! Menu Model

use serde::{Deserialize, Serialize};

/// A dish on the menu
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    #[serde(rename = "_id")]
    pub id: String,
    pub dish_name: String,
    /// Price in currency unit
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// One category's worth of dishes (`GET /menu` returns a list of these)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuSection {
    #[serde(rename = "_id")]
    pub id: String,
    pub category_name: String,
    #[serde(default)]
    pub items: Vec<Dish>,
}

/// Create menu item payload (sent as multipart form fields)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemCreate {
    pub category_name: String,
    pub dish_name: String,
    /// Price in currency unit
    pub price: f64,
}

/// Update menu item payload (sent as multipart form fields)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemUpdate {
    pub dish_name: String,
    /// Price in currency unit
    pub price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_section_decodes_backend_shape() {
        let json = r#"{
            "_id": "64f0",
            "categoryName": "Drinks",
            "items": [
                {"_id": "64f1", "dishName": "Cola", "price": 2.5},
                {"_id": "64f2", "dishName": "Water", "price": 1.0, "description": "Still"}
            ]
        }"#;

        let section: MenuSection = serde_json::from_str(json).unwrap();
        assert_eq!(section.category_name, "Drinks");
        assert_eq!(section.items.len(), 2);
        assert_eq!(section.items[0].dish_name, "Cola");
        assert_eq!(section.items[1].description.as_deref(), Some("Still"));
    }

    #[test]
    fn test_menu_section_items_default_empty() {
        let json = r#"{"_id": "64f0", "categoryName": "Empty"}"#;
        let section: MenuSection = serde_json::from_str(json).unwrap();
        assert!(section.items.is_empty());
    }
}
