//! Brand and Color Entities
//!
//! Both are a bare name plus status, validated and stored the same way.

use chrono::{DateTime, Utc};
use kernel::id::{BrandId, ColorId};

use crate::domain::resource::{Resource, ResourceKind};
use crate::domain::value_object::{record_status::RecordStatus, slug::Slug};

/// Payload shared by brands and colors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedDraft {
    pub name: String,
    pub status: RecordStatus,
}

#[derive(Debug, Clone)]
pub struct Brand {
    pub id: BrandId,
    pub slug: Slug,
    pub name: String,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Color {
    pub id: ColorId,
    pub slug: Slug,
    pub name: String,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

macro_rules! named_resource {
    ($entity:ty, $key:literal, $title:literal, $noun:literal) => {
        impl Resource for $entity {
            type Draft = NamedDraft;

            const KIND: ResourceKind = ResourceKind {
                key: $key,
                title: $title,
                failure_noun: $noun,
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
        }
    };
}

named_resource!(Brand, "brand", "Brand", "Brand");
named_resource!(Color, "color", "Color", "Color");
