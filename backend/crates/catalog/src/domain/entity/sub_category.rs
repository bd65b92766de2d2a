//! Sub Category Entity
//!
//! Always belongs to one category; deleted together with it.

use chrono::{DateTime, Utc};
use kernel::id::{CategoryId, SubCategoryId};

use crate::domain::resource::{Resource, ResourceKind};
use crate::domain::value_object::{record_status::RecordStatus, slug::Slug};

#[derive(Debug, Clone)]
pub struct SubCategory {
    pub id: SubCategoryId,
    pub slug: Slug,
    pub name: String,
    pub status: RecordStatus,
    pub category_id: CategoryId,
    /// Name of the parent category, loaded with the row
    pub category_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubCategoryDraft {
    pub name: String,
    pub status: RecordStatus,
    pub category_id: CategoryId,
}

impl Resource for SubCategory {
    type Draft = SubCategoryDraft;

    const KIND: ResourceKind = ResourceKind {
        key: "sub_category",
        title: "Sub Category",
        failure_noun: "sub category",
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
}
