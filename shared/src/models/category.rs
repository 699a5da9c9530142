//! Category Model
//!
//! The categories resource is a single named-list document: one `_id`
//! holding the full list of category names.

use serde::{Deserialize, Serialize};

/// A named list of category names
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryList {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub categories: Vec<String>,
}

/// `GET /categories` response data wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesData {
    #[serde(default)]
    pub categories: Vec<CategoryList>,
}

/// Add category names payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryAdd {
    pub categories: Vec<String>,
}

/// Remove a category name payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRemove {
    pub category: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_data_decodes_list_document() {
        let json = r#"{
            "categories": [
                {"_id": "64aa", "categories": ["Drinks", "Mains", "Desserts"]}
            ]
        }"#;

        let data: CategoriesData = serde_json::from_str(json).unwrap();
        assert_eq!(data.categories.len(), 1);
        assert_eq!(data.categories[0].categories.len(), 3);
        assert_eq!(data.categories[0].categories[1], "Mains");
    }
}
