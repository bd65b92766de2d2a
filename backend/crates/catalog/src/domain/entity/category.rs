//! Category Entity

use chrono::{DateTime, Utc};
use kernel::id::CategoryId;

use crate::domain::resource::{Resource, ResourceKind};
use crate::domain::value_object::{record_status::RecordStatus, slug::Slug};

#[derive(Debug, Clone)]
pub struct Category {
    pub id: CategoryId,
    pub slug: Slug,
    pub name: String,
    pub status: RecordStatus,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDraft {
    pub name: String,
    pub status: RecordStatus,
}

impl Resource for Category {
    type Draft = CategoryDraft;

    const KIND: ResourceKind = ResourceKind {
        key: "category",
        title: "Category",
        failure_noun: "category",
    };

    const UNIQUE_NAME: bool = true;

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
        self.image.as_deref()
    }
}
