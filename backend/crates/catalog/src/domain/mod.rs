//! Domain Layer
//!
//! Contains entities, value objects, the resource capability and
//! repository traits.

pub mod entity;
pub mod repository;
pub mod resource;
pub mod value_object;

// Re-exports
pub use entity::{Brand, Category, Color, Product, SubCategory};
pub use repository::{ReferenceLookup, ResourceRepository};
pub use resource::{ActiveItem, Reference, ReferenceTarget, Resource, ResourceKind};
