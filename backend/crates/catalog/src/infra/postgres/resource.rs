//! Table description of a catalog entity
//!
//! Everything the generic repository and list engine need to know about
//! an entity's table: columns, joins, searchable columns, sortable keys
//! and how its images cascade.

use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Postgres, QueryBuilder};

use crate::domain::resource::Resource;
use crate::error::CatalogResult;

/// Bindable column value of a draft
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
    Id(i64),
    OptId(Option<i64>),
    Decimal(Decimal),
    OptDecimal(Option<Decimal>),
}

impl SqlValue {
    pub(crate) fn push_bind(self, builder: &mut QueryBuilder<'_, Postgres>) {
        match self {
            SqlValue::Text(v) => builder.push_bind(v),
            SqlValue::Id(v) => builder.push_bind(v),
            SqlValue::OptId(v) => builder.push_bind(v),
            SqlValue::Decimal(v) => builder.push_bind(v),
            SqlValue::OptDecimal(v) => builder.push_bind(v),
        };
    }
}

pub trait PgResource: Resource {
    type Row: for<'r> FromRow<'r, PgRow> + Send + Unpin;

    const TABLE: &'static str;

    /// Select list, table-qualified
    const COLUMNS: &'static str;

    /// `FROM` target including joins
    const FROM: &'static str;

    /// Columns matched by the `search` term
    const SEARCH: &'static [&'static str];

    /// `sort_by` key to column
    const SORTS: &'static [(&'static str, &'static str)];

    const IMAGE_COLUMN: Option<&'static str> = None;

    /// Images of product rows removed together with the rows whose ids
    /// are bound as `$1`
    const CASCADED_IMAGES: Option<&'static str> = None;

    /// Column/value pairs written on create and update
    fn values(draft: &Self::Draft) -> Vec<(&'static str, SqlValue)>;

    fn from_row(row: Self::Row) -> CatalogResult<Self>;
}
