//! Table descriptions of the five catalog entities

use chrono::{DateTime, Utc};
use kernel::id::{BrandId, CategoryId, ColorId, ProductId, SubCategoryId};
use rust_decimal::Decimal;

use super::resource::{PgResource, SqlValue};
use crate::domain::entity::{
    Brand, Category, CategoryDraft, Color, NamedDraft, Product, ProductDraft, SubCategory,
    SubCategoryDraft,
};
use crate::domain::value_object::{
    featured::Featured, price::Price, record_status::RecordStatus, slug::Slug,
};
use crate::error::{CatalogError, CatalogResult};

fn status_from_db(raw: &str) -> CatalogResult<RecordStatus> {
    RecordStatus::parse(raw)
        .ok_or_else(|| CatalogError::Internal(format!("unknown status '{}' in database", raw)))
}

// ============================================================================
// Category
// ============================================================================

#[derive(sqlx::FromRow)]
pub struct CategoryRow {
    id: i64,
    slug: String,
    name: String,
    status: String,
    image: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PgResource for Category {
    type Row = CategoryRow;

    const TABLE: &'static str = "categories";
    const COLUMNS: &'static str = "categories.id, categories.slug, categories.name, \
         categories.status, categories.image, categories.created_at, categories.updated_at";
    const FROM: &'static str = "categories";
    const SEARCH: &'static [&'static str] = &["categories.name", "categories.status"];
    const SORTS: &'static [(&'static str, &'static str)] = &[
        ("name", "categories.name"),
        ("status", "categories.status"),
        ("updated_at", "categories.updated_at"),
    ];
    const IMAGE_COLUMN: Option<&'static str> = Some("image");
    const CASCADED_IMAGES: Option<&'static str> = Some(
        "SELECT image FROM products WHERE category_id = ANY($1) \
         OR sub_category_id IN (SELECT id FROM sub_categories WHERE category_id = ANY($1))",
    );

    fn values(draft: &CategoryDraft) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("name", SqlValue::Text(draft.name.clone())),
            ("status", SqlValue::Text(draft.status.to_string())),
        ]
    }

    fn from_row(row: CategoryRow) -> CatalogResult<Self> {
        Ok(Category {
            id: CategoryId::new(row.id),
            slug: Slug::from_db(row.slug),
            name: row.name,
            status: status_from_db(&row.status)?,
            image: row.image,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

// ============================================================================
// Sub Category
// ============================================================================

#[derive(sqlx::FromRow)]
pub struct SubCategoryRow {
    id: i64,
    slug: String,
    name: String,
    status: String,
    category_id: i64,
    category_name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PgResource for SubCategory {
    type Row = SubCategoryRow;

    const TABLE: &'static str = "sub_categories";
    const COLUMNS: &'static str = "sub_categories.id, sub_categories.slug, sub_categories.name, \
         sub_categories.status, sub_categories.category_id, categories.name AS category_name, \
         sub_categories.created_at, sub_categories.updated_at";
    const FROM: &'static str =
        "sub_categories JOIN categories ON categories.id = sub_categories.category_id";
    const SEARCH: &'static [&'static str] = &[
        "sub_categories.name",
        "sub_categories.status",
        "categories.name",
    ];
    const SORTS: &'static [(&'static str, &'static str)] = &[
        ("name", "sub_categories.name"),
        ("status", "sub_categories.status"),
        ("updated_at", "sub_categories.updated_at"),
        ("category", "categories.name"),
    ];
    const CASCADED_IMAGES: Option<&'static str> =
        Some("SELECT image FROM products WHERE sub_category_id = ANY($1)");

    fn values(draft: &SubCategoryDraft) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("name", SqlValue::Text(draft.name.clone())),
            ("status", SqlValue::Text(draft.status.to_string())),
            ("category_id", SqlValue::Id(draft.category_id.get())),
        ]
    }

    fn from_row(row: SubCategoryRow) -> CatalogResult<Self> {
        Ok(SubCategory {
            id: SubCategoryId::new(row.id),
            slug: Slug::from_db(row.slug),
            name: row.name,
            status: status_from_db(&row.status)?,
            category_id: CategoryId::new(row.category_id),
            category_name: row.category_name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

// ============================================================================
// Brand and Color
// ============================================================================

#[derive(sqlx::FromRow)]
pub struct NamedRow {
    id: i64,
    slug: String,
    name: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn named_values(draft: &NamedDraft) -> Vec<(&'static str, SqlValue)> {
    vec![
        ("name", SqlValue::Text(draft.name.clone())),
        ("status", SqlValue::Text(draft.status.to_string())),
    ]
}

impl PgResource for Brand {
    type Row = NamedRow;

    const TABLE: &'static str = "brands";
    const COLUMNS: &'static str =
        "brands.id, brands.slug, brands.name, brands.status, brands.created_at, brands.updated_at";
    const FROM: &'static str = "brands";
    const SEARCH: &'static [&'static str] = &["brands.name", "brands.status"];
    const SORTS: &'static [(&'static str, &'static str)] = &[
        ("name", "brands.name"),
        ("status", "brands.status"),
        ("updated_at", "brands.updated_at"),
    ];
    const CASCADED_IMAGES: Option<&'static str> =
        Some("SELECT image FROM products WHERE brand_id = ANY($1)");

    fn values(draft: &NamedDraft) -> Vec<(&'static str, SqlValue)> {
        named_values(draft)
    }

    fn from_row(row: NamedRow) -> CatalogResult<Self> {
        Ok(Brand {
            id: BrandId::new(row.id),
            slug: Slug::from_db(row.slug),
            name: row.name,
            status: status_from_db(&row.status)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl PgResource for Color {
    type Row = NamedRow;

    const TABLE: &'static str = "colors";
    const COLUMNS: &'static str =
        "colors.id, colors.slug, colors.name, colors.status, colors.created_at, colors.updated_at";
    const FROM: &'static str = "colors";
    const SEARCH: &'static [&'static str] = &["colors.name", "colors.status"];
    const SORTS: &'static [(&'static str, &'static str)] = &[
        ("name", "colors.name"),
        ("status", "colors.status"),
        ("updated_at", "colors.updated_at"),
    ];
    const CASCADED_IMAGES: Option<&'static str> =
        Some("SELECT image FROM products WHERE color_id = ANY($1)");

    fn values(draft: &NamedDraft) -> Vec<(&'static str, SqlValue)> {
        named_values(draft)
    }

    fn from_row(row: NamedRow) -> CatalogResult<Self> {
        Ok(Color {
            id: ColorId::new(row.id),
            slug: Slug::from_db(row.slug),
            name: row.name,
            status: status_from_db(&row.status)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

// ============================================================================
// Product
// ============================================================================

#[derive(sqlx::FromRow)]
pub struct ProductRow {
    id: i64,
    slug: String,
    name: String,
    description: String,
    price: Decimal,
    compare_price: Option<Decimal>,
    image: String,
    is_featured: String,
    status: String,
    category_id: i64,
    category_name: String,
    sub_category_id: Option<i64>,
    sub_category_name: Option<String>,
    brand_id: Option<i64>,
    brand_name: Option<String>,
    color_id: Option<i64>,
    color_name: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PgResource for Product {
    type Row = ProductRow;

    const TABLE: &'static str = "products";
    const COLUMNS: &'static str = "products.id, products.slug, products.name, \
         products.description, products.price, products.compare_price, products.image, \
         products.is_featured, \
         products.status, products.category_id, categories.name AS category_name, \
         products.sub_category_id, sub_categories.name AS sub_category_name, \
         products.brand_id, brands.name AS brand_name, \
         products.color_id, colors.name AS color_name, \
         products.created_at, products.updated_at";
    const FROM: &'static str = "products \
         JOIN categories ON categories.id = products.category_id \
         LEFT JOIN sub_categories ON sub_categories.id = products.sub_category_id \
         LEFT JOIN brands ON brands.id = products.brand_id \
         LEFT JOIN colors ON colors.id = products.color_id";
    const SEARCH: &'static [&'static str] = &[
        "products.name",
        "products.status",
        "products.price::text",
    ];
    const SORTS: &'static [(&'static str, &'static str)] = &[
        ("name", "products.name"),
        ("status", "products.status"),
        ("updated_at", "products.updated_at"),
        ("category", "categories.name"),
        ("sub_category", "sub_categories.name"),
        ("brand", "brands.name"),
        ("color", "colors.name"),
        ("price", "products.price"),
        ("compare_price", "products.compare_price"),
        ("is_featured", "products.is_featured"),
    ];
    const IMAGE_COLUMN: Option<&'static str> = Some("image");

    fn values(draft: &ProductDraft) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("name", SqlValue::Text(draft.name.clone())),
            ("description", SqlValue::Text(draft.description.clone())),
            ("price", SqlValue::Decimal(draft.price.amount())),
            (
                "compare_price",
                SqlValue::OptDecimal(draft.compare_price.map(|p| p.amount())),
            ),
            ("is_featured", SqlValue::Text(draft.is_featured.to_string())),
            ("status", SqlValue::Text(draft.status.to_string())),
            ("category_id", SqlValue::Id(draft.category_id.get())),
            (
                "sub_category_id",
                SqlValue::OptId(draft.sub_category_id.map(|id| id.get())),
            ),
            ("brand_id", SqlValue::OptId(draft.brand_id.map(|id| id.get()))),
            ("color_id", SqlValue::OptId(draft.color_id.map(|id| id.get()))),
        ]
    }

    fn from_row(row: ProductRow) -> CatalogResult<Self> {
        let is_featured = Featured::parse(&row.is_featured).ok_or_else(|| {
            CatalogError::Internal(format!(
                "unknown featured flag '{}' in database",
                row.is_featured
            ))
        })?;

        Ok(Product {
            id: ProductId::new(row.id),
            slug: Slug::from_db(row.slug),
            name: row.name,
            description: row.description,
            price: Price::from_db(row.price),
            compare_price: row.compare_price.map(Price::from_db),
            image: row.image,
            is_featured,
            status: status_from_db(&row.status)?,
            category_id: CategoryId::new(row.category_id),
            category_name: row.category_name,
            sub_category_id: row.sub_category_id.map(SubCategoryId::new),
            sub_category_name: row.sub_category_name,
            brand_id: row.brand_id.map(BrandId::new),
            brand_name: row.brand_name,
            color_id: row.color_id.map(ColorId::new),
            color_name: row.color_name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
