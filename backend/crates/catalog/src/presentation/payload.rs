//! Response payloads
//!
//! Maps entities to the JSON shape clients read: common fields, public
//! image URLs, humanized `created_at` and names of referenced rows.

use chrono::{DateTime, Utc};
use platform::storage::FileStorage;
use serde::Serialize;

use crate::domain::entity::{Brand, Category, Color, Product, SubCategory};
use crate::domain::resource::Resource;
use crate::presentation::humanize::{format_timestamp, humanize};

/// Placeholder for absent optional values
pub const NOT_AVAILABLE: &str = "N/A";

/// Clock and storage used while rendering
pub struct PresentContext<'a, S: FileStorage> {
    pub now: DateTime<Utc>,
    pub storage: &'a S,
}

impl<'a, S: FileStorage> PresentContext<'a, S> {
    pub fn new(storage: &'a S) -> Self {
        Self {
            now: Utc::now(),
            storage,
        }
    }

    fn image_url(&self, path: &str) -> String {
        self.storage.url(path)
    }
}

pub trait Present: Resource {
    type Payload: Serialize + Send;

    fn present<S: FileStorage>(&self, ctx: &PresentContext<'_, S>) -> Self::Payload;
}

/// Fields every catalog payload starts with
#[derive(Debug, Clone, Serialize)]
pub struct CommonFields {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub status: &'static str,
    pub created_at: String,
    pub updated_at: String,
}

impl CommonFields {
    fn of<E: Resource, S: FileStorage>(entity: &E, ctx: &PresentContext<'_, S>) -> Self {
        Self {
            id: entity.id(),
            slug: entity.slug().to_string(),
            name: entity.name().to_string(),
            status: entity.status().as_str(),
            created_at: humanize(entity.created_at(), ctx.now),
            updated_at: format_timestamp(entity.updated_at()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryPayload {
    #[serde(flatten)]
    pub common: CommonFields,
    pub image: Option<String>,
}

impl Present for Category {
    type Payload = CategoryPayload;

    fn present<S: FileStorage>(&self, ctx: &PresentContext<'_, S>) -> CategoryPayload {
        CategoryPayload {
            common: CommonFields::of(self, ctx),
            image: self.image.as_deref().map(|path| ctx.image_url(path)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubCategoryPayload {
    #[serde(flatten)]
    pub common: CommonFields,
    pub category_id: i64,
    pub category: String,
}

impl Present for SubCategory {
    type Payload = SubCategoryPayload;

    fn present<S: FileStorage>(&self, ctx: &PresentContext<'_, S>) -> SubCategoryPayload {
        SubCategoryPayload {
            common: CommonFields::of(self, ctx),
            category_id: self.category_id.get(),
            category: self.category_name.clone(),
        }
    }
}

impl Present for Brand {
    type Payload = CommonFields;

    fn present<S: FileStorage>(&self, ctx: &PresentContext<'_, S>) -> CommonFields {
        CommonFields::of(self, ctx)
    }
}

impl Present for Color {
    type Payload = CommonFields;

    fn present<S: FileStorage>(&self, ctx: &PresentContext<'_, S>) -> CommonFields {
        CommonFields::of(self, ctx)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductPayload {
    #[serde(flatten)]
    pub common: CommonFields,
    pub image: String,
    pub description: String,
    pub price: String,
    pub compare_price: String,
    pub is_featured: &'static str,
    pub category: String,
    pub sub_category: String,
    pub brand: String,
    pub color: String,
    pub category_id: i64,
    pub sub_category_id: Option<i64>,
    pub brand_id: Option<i64>,
    pub color_id: Option<i64>,
}

fn or_not_available(name: Option<&String>) -> String {
    name.cloned().unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

impl Present for Product {
    type Payload = ProductPayload;

    fn present<S: FileStorage>(&self, ctx: &PresentContext<'_, S>) -> ProductPayload {
        ProductPayload {
            common: CommonFields::of(self, ctx),
            image: ctx.image_url(&self.image),
            description: self.description.clone(),
            price: self.price.to_string(),
            compare_price: self
                .compare_price
                .map(|p| p.to_string())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            is_featured: self.is_featured.as_str(),
            category: self.category_name.clone(),
            sub_category: or_not_available(self.sub_category_name.as_ref()),
            brand: or_not_available(self.brand_name.as_ref()),
            color: or_not_available(self.color_name.as_ref()),
            category_id: self.category_id.get(),
            sub_category_id: self.sub_category_id.map(|id| id.get()),
            brand_id: self.brand_id.map(|id| id.get()),
            color_id: self.color_id.map(|id| id.get()),
        }
    }
}
