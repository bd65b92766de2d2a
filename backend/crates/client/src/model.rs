//! Resource representations returned by the API

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// A catalog resource reachable under `{api}/{PATH}`
pub trait ClientResource: DeserializeOwned + Clone + Send + Sync + 'static {
    const PATH: &'static str;

    fn slug(&self) -> &str;
}

macro_rules! client_resource {
    ($ty:ty, $path:literal) => {
        impl ClientResource for $ty {
            const PATH: &'static str = $path;

            fn slug(&self) -> &str {
                &self.slug
            }
        }
    };
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub status: String,
    /// Public URL of the image
    pub image: Option<String>,
    /// Relative age, e.g. "3 hours ago"
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubCategory {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub status: String,
    pub category_id: i64,
    /// Parent category name
    pub category: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Brand {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Color {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Product; optional references read `"N/A"` when unset
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Product {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub status: String,
    pub image: String,
    pub description: String,
    pub price: String,
    pub compare_price: String,
    pub is_featured: String,
    pub category: String,
    pub sub_category: String,
    pub brand: String,
    pub color: String,
    pub category_id: i64,
    pub sub_category_id: Option<i64>,
    pub brand_id: Option<i64>,
    pub color_id: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

client_resource!(Category, "category");
client_resource!(SubCategory, "sub_category");
client_resource!(Brand, "brands");
client_resource!(Color, "colors");
client_resource!(Product, "products");

/// Entry of an `/active` list, used for select inputs
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ActiveEntry {
    pub id: i64,
    pub slug: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub email_verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessageBody {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_with_placeholders() {
        let json = serde_json::json!({
            "id": 4,
            "slug": "aB3dE5fG",
            "name": "Runner",
            "status": "active",
            "created_at": "2 minutes ago",
            "updated_at": "2024-05-01 10:00:00",
            "image": "http://localhost:8000/storage/products/x.jpg",
            "description": "Lightweight trail shoe",
            "price": "12.50",
            "compare_price": "N/A",
            "is_featured": "Yes",
            "category": "Shoes",
            "sub_category": "N/A",
            "brand": "N/A",
            "color": "N/A",
            "category_id": 1,
            "sub_category_id": null,
            "brand_id": null,
            "color_id": null
        });

        let product: Product = serde_json::from_value(json).unwrap();
        assert_eq!(product.slug(), "aB3dE5fG");
        assert_eq!(product.compare_price, "N/A");
        assert!(product.brand_id.is_none());
        assert_eq!(Product::PATH, "products");
    }
}
