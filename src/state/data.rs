/// Shared data structures for the application state
///
/// The product shape as the remote API serves it. It flows unchanged from
/// the gateway into the storefront/dashboard grids and the edit form.

use serde::{Deserialize, Serialize};

use super::sizes::SizeRow;

/// One product in the remote catalog.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Remote identifier (Mongo-style `_id`)
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    /// URL of the uploaded product image
    #[serde(rename = "imageLink", default)]
    pub image_link: String,
    /// Size variants; the API may omit the field entirely
    #[serde(default)]
    pub sizes: Vec<SizeRow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_product() {
        let json = r#"{
            "_id": "p1",
            "title": "Chair",
            "description": "Wood chair",
            "imageLink": "http://h/x.png",
            "sizes": [{"width": "40", "height": "90", "price": "15000"}]
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.id, "p1");
        assert_eq!(product.image_link, "http://h/x.png");
        assert_eq!(product.sizes.len(), 1);
        assert_eq!(product.sizes[0].width, "40");
    }

    #[test]
    fn test_decode_tolerates_missing_sizes_and_image() {
        let json = r#"{"_id": "p2", "title": "X", "description": "Y"}"#;

        let product: Product = serde_json::from_str(json).unwrap();

        assert!(product.sizes.is_empty());
        assert!(product.image_link.is_empty());
    }
}
