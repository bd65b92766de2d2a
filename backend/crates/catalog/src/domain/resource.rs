//! Resource Capability
//!
//! What the shared list/show/create/update/delete machinery needs to know
//! about a catalog entity. Each of the five entities implements
//! [`Resource`]; storage and presentation layers extend it with their own
//! traits.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::value_object::{record_status::RecordStatus, slug::Slug};

/// Naming used in responses and logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceKind {
    /// Log and route key, e.g. `sub_category`
    pub key: &'static str,
    /// Title used in success messages, e.g. `Sub Category`
    pub title: &'static str,
    /// Noun used in delete failure messages, e.g. `sub category`
    pub failure_noun: &'static str,
}

impl ResourceKind {
    /// `"<Title> deleted successfully."`
    pub fn deleted_message(&self) -> String {
        format!("{} deleted successfully.", self.title)
    }

    /// `"Failed to delete the <noun>."`
    pub fn delete_failed_message(&self) -> String {
        format!("Failed to delete the {}.", self.failure_noun)
    }
}

pub trait Resource: Clone + Send + Sync + 'static {
    /// Validated create/update payload, without the image
    type Draft: Send + Sync;

    const KIND: ResourceKind;

    /// Names must be unique, ignoring case
    const UNIQUE_NAME: bool;

    fn id(&self) -> i64;
    fn slug(&self) -> &Slug;
    fn name(&self) -> &str;
    fn status(&self) -> RecordStatus;
    fn created_at(&self) -> DateTime<Utc>;
    fn updated_at(&self) -> DateTime<Utc>;

    /// Stored image path, if the entity carries one
    fn image(&self) -> Option<&str> {
        None
    }
}

/// Entry of the `/active` lists used by select boxes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveItem {
    pub id: i64,
    pub slug: Slug,
    pub name: String,
}

/// Foreign keys a form may point at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceTarget {
    Category,
    SubCategory,
    Brand,
    Color,
}

/// A foreign key to check before writing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub field: &'static str,
    pub target: ReferenceTarget,
    pub id: i64,
    /// Message recorded when the row does not exist
    pub message: String,
}
