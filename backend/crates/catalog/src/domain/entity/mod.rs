//! Entity Module

pub mod brand;
pub mod category;
pub mod product;
pub mod sub_category;

pub use brand::{Brand, Color, NamedDraft};
pub use category::{Category, CategoryDraft};
pub use product::{Product, ProductDraft};
pub use sub_category::{SubCategory, SubCategoryDraft};
