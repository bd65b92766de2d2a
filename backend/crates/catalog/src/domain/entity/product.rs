//! Product Entity
//!
//! References a required category and optional sub category, brand and
//! color. Names of the referenced rows are loaded with the product.

use chrono::{DateTime, Utc};
use kernel::id::{BrandId, CategoryId, ColorId, ProductId, SubCategoryId};

use crate::domain::resource::{Resource, ResourceKind};
use crate::domain::value_object::{
    featured::Featured, price::Price, record_status::RecordStatus, slug::Slug,
};

#[derive(Debug, Clone)]
pub struct Product {
    pub id: ProductId,
    pub slug: Slug,
    pub name: String,
    pub description: String,
    pub price: Price,
    /// Strictly greater than `price` when present
    pub compare_price: Option<Price>,
    pub image: String,
    pub is_featured: Featured,
    pub status: RecordStatus,
    pub category_id: CategoryId,
    pub category_name: String,
    pub sub_category_id: Option<SubCategoryId>,
    pub sub_category_name: Option<String>,
    pub brand_id: Option<BrandId>,
    pub brand_name: Option<String>,
    pub color_id: Option<ColorId>,
    pub color_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub compare_price: Option<Price>,
    pub is_featured: Featured,
    pub status: RecordStatus,
    pub category_id: CategoryId,
    pub sub_category_id: Option<SubCategoryId>,
    pub brand_id: Option<BrandId>,
    pub color_id: Option<ColorId>,
}

impl Resource for Product {
    type Draft = ProductDraft;

    const KIND: ResourceKind = ResourceKind {
        key: "product",
        title: "Product",
        failure_noun: "product",
    };

    const UNIQUE_NAME: bool = false;

    fn id(&self) -> i64 {
        self.id.get()
    }

    fn slug(&self) -> &Slug {
        &self.slug
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn status(&self) -> RecordStatus {
        self.status
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn image(&self) -> Option<&str> {
        Some(&self.image)
    }
}
