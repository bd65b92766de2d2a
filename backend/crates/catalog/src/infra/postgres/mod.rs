//! PostgreSQL Repository Implementation
//!
//! One generic repository serves every entity that describes its table
//! through [`PgResource`].

mod entities;
pub mod list;
pub mod resource;

use std::collections::HashSet;

use kernel::query::{ListQuery, Paginated};
use kernel::validation::FieldErrors;
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};

use crate::domain::repository::{ReferenceLookup, ResourceRepository};
use crate::domain::resource::{ActiveItem, ReferenceTarget};
use crate::domain::value_object::slug::Slug;
use crate::error::{CatalogError, CatalogResult};

pub use entities::{CategoryRow, NamedRow, ProductRow, SubCategoryRow};
pub use resource::{PgResource, SqlValue};

/// Suffix shared by the case-insensitive unique name indexes
const NAME_INDEX_SUFFIX: &str = "_name_lower_idx";

const UNIQUE_VIOLATION: &str = "23505";

fn is_name_conflict(code: Option<&str>, constraint: Option<&str>) -> bool {
    code == Some(UNIQUE_VIOLATION) && constraint.is_some_and(|c| c.ends_with(NAME_INDEX_SUFFIX))
}

/// A write that lost a race on the name index reads as a taken name
fn write_error(err: sqlx::Error) -> CatalogError {
    if let sqlx::Error::Database(db) = &err {
        if is_name_conflict(db.code().as_deref(), db.constraint()) {
            let mut errors = FieldErrors::new();
            errors.unique("name", true);
            return CatalogError::Validation(errors);
        }
    }
    CatalogError::Database(err)
}

/// PostgreSQL-backed catalog repository
#[derive(Clone)]
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_by<E: PgResource>(
        &self,
        column: &str,
        value: &str,
    ) -> CatalogResult<Option<E>> {
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM {} WHERE {}.{} = ",
            E::COLUMNS,
            E::FROM,
            E::TABLE,
            column
        ));
        builder.push_bind(value.to_string());

        let row = builder
            .build_query_as::<E::Row>()
            .fetch_optional(&self.pool)
            .await?;

        row.map(E::from_row).transpose()
    }

    async fn fetch_by_id<E: PgResource>(&self, id: i64) -> CatalogResult<E> {
        let row = sqlx::query_as::<_, E::Row>(&format!(
            "SELECT {} FROM {} WHERE {}.id = $1",
            E::COLUMNS,
            E::FROM,
            E::TABLE
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        E::from_row(row)
    }

    /// Own images of `ids` plus the images of products cascading from them
    async fn orphaned_images<E: PgResource>(
        tx: &mut Transaction<'_, Postgres>,
        ids: &[i64],
    ) -> CatalogResult<Vec<String>> {
        let mut images = Vec::new();

        if let Some(column) = E::IMAGE_COLUMN {
            let own: Vec<Option<String>> = sqlx::query_scalar(&format!(
                "SELECT {} FROM {} WHERE id = ANY($1)",
                column,
                E::TABLE
            ))
            .bind(ids)
            .fetch_all(&mut **tx)
            .await?;
            images.extend(own.into_iter().flatten());
        }

        if let Some(sql) = E::CASCADED_IMAGES {
            let cascaded: Vec<String> = sqlx::query_scalar(sql)
                .bind(ids)
                .fetch_all(&mut **tx)
                .await?;
            images.extend(cascaded);
        }

        Ok(images)
    }

    async fn delete_ids<E: PgResource>(&self, ids: &[i64]) -> CatalogResult<Vec<String>> {
        let mut tx = self.pool.begin().await?;

        let images = Self::orphaned_images::<E>(&mut tx, ids).await?;

        sqlx::query(&format!("DELETE FROM {} WHERE id = ANY($1)", E::TABLE))
            .bind(ids)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(images)
    }
}

// ============================================================================
// Resource Repository Implementation
// ============================================================================

impl<E: PgResource> ResourceRepository<E> for PgCatalogRepository {
    async fn list(&self, query: &ListQuery) -> CatalogResult<Paginated<E>> {
        let total: i64 = list::count_query::<E>(query)
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let rows = list::page_query::<E>(query)
            .build_query_as::<E::Row>()
            .fetch_all(&self.pool)
            .await?;

        Paginated::new(rows, query.meta(total.max(0) as u64)).try_map(E::from_row)
    }

    async fn find_by_slug(&self, slug: &str) -> CatalogResult<Option<E>> {
        self.fetch_by::<E>("slug", slug).await
    }

    async fn slug_exists(&self, slug: &Slug) -> CatalogResult<bool> {
        let exists: bool = sqlx::query_scalar(&format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE slug = $1)",
            E::TABLE
        ))
        .bind(slug.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn name_taken(&self, name: &str, except: Option<i64>) -> CatalogResult<bool> {
        let taken: bool = sqlx::query_scalar(&format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE LOWER(name) = LOWER($1) \
             AND ($2::BIGINT IS NULL OR id <> $2))",
            E::TABLE
        ))
        .bind(name)
        .bind(except)
        .fetch_one(&self.pool)
        .await?;

        Ok(taken)
    }

    async fn create(
        &self,
        slug: &Slug,
        draft: &E::Draft,
        image: Option<&str>,
    ) -> CatalogResult<E> {
        let mut values = E::values(draft);
        values.insert(0, ("slug", SqlValue::Text(slug.as_str().to_string())));
        if let (Some(column), Some(path)) = (E::IMAGE_COLUMN, image) {
            values.push((column, SqlValue::Text(path.to_string())));
        }

        let columns = values
            .iter()
            .map(|(column, _)| *column)
            .collect::<Vec<_>>()
            .join(", ");

        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "INSERT INTO {} ({}) VALUES (",
            E::TABLE,
            columns
        ));
        for (i, (_, value)) in values.into_iter().enumerate() {
            if i > 0 {
                builder.push(", ");
            }
            value.push_bind(&mut builder);
        }
        builder.push(") RETURNING id");

        let id: i64 = builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(write_error)?;

        self.fetch_by_id::<E>(id).await
    }

    async fn update(
        &self,
        current: &E,
        draft: &E::Draft,
        image: Option<&str>,
    ) -> CatalogResult<E> {
        let mut values = E::values(draft);
        if let (Some(column), Some(path)) = (E::IMAGE_COLUMN, image) {
            values.push((column, SqlValue::Text(path.to_string())));
        }

        let mut builder = QueryBuilder::<Postgres>::new(format!("UPDATE {} SET ", E::TABLE));
        for (column, value) in values {
            builder.push(column).push(" = ");
            value.push_bind(&mut builder);
            builder.push(", ");
        }
        builder
            .push("updated_at = NOW() WHERE id = ")
            .push_bind(current.id());

        builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(write_error)?;

        self.fetch_by_id::<E>(current.id()).await
    }

    async fn delete(&self, entity: &E) -> CatalogResult<Vec<String>> {
        self.delete_ids::<E>(&[entity.id()]).await
    }

    async fn missing_slugs(&self, slugs: &[String]) -> CatalogResult<Vec<usize>> {
        let found: Vec<String> = sqlx::query_scalar(&format!(
            "SELECT slug FROM {} WHERE slug = ANY($1)",
            E::TABLE
        ))
        .bind(slugs)
        .fetch_all(&self.pool)
        .await?;

        let found: HashSet<String> = found.into_iter().collect();
        Ok(slugs
            .iter()
            .enumerate()
            .filter(|(_, slug)| !found.contains(*slug))
            .map(|(index, _)| index)
            .collect())
    }

    async fn delete_many(&self, slugs: &[String]) -> CatalogResult<Vec<String>> {
        let ids: Vec<i64> = sqlx::query_scalar(&format!(
            "SELECT id FROM {} WHERE slug = ANY($1)",
            E::TABLE
        ))
        .bind(slugs)
        .fetch_all(&self.pool)
        .await?;

        self.delete_ids::<E>(&ids).await
    }

    async fn active(&self) -> CatalogResult<Vec<ActiveItem>> {
        let rows: Vec<(i64, String, String)> = sqlx::query_as(&format!(
            "SELECT id, slug, name FROM {} WHERE status = 'active' ORDER BY name ASC",
            E::TABLE
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, slug, name)| ActiveItem {
                id,
                slug: Slug::from_db(slug),
                name,
            })
            .collect())
    }
}

// ============================================================================
// Reference Lookup Implementation
// ============================================================================

fn reference_table(target: ReferenceTarget) -> &'static str {
    match target {
        ReferenceTarget::Category => "categories",
        ReferenceTarget::SubCategory => "sub_categories",
        ReferenceTarget::Brand => "brands",
        ReferenceTarget::Color => "colors",
    }
}

impl ReferenceLookup for PgCatalogRepository {
    async fn reference_exists(&self, target: ReferenceTarget, id: i64) -> CatalogResult<bool> {
        let exists: bool = sqlx::query_scalar(&format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1)",
            reference_table(target)
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
