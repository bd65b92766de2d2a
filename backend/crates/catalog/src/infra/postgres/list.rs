//! List query engine
//!
//! Builds the filtered, sorted and paginated statements for any
//! [`PgResource`]. The count and the page query share one filter.

use kernel::query::ListQuery;
use sqlx::{Postgres, QueryBuilder};

use super::resource::PgResource;

/// Escape `LIKE` wildcards and wrap the term for substring matching
pub(crate) fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Allow-listed column for `sort_by`, else `updated_at`
pub(crate) fn sort_column<E: PgResource>(sort_by: Option<&str>) -> String {
    sort_by
        .and_then(|key| E::SORTS.iter().find(|(k, _)| *k == key))
        .map(|(_, column)| column.to_string())
        .unwrap_or_else(|| format!("{}.updated_at", E::TABLE))
}

fn push_filters<E: PgResource>(builder: &mut QueryBuilder<'_, Postgres>, query: &ListQuery) {
    builder.push(" WHERE TRUE");

    if let Some(term) = &query.search {
        let pattern = like_pattern(term);
        builder.push(" AND (");
        for (i, column) in E::SEARCH.iter().enumerate() {
            if i > 0 {
                builder.push(" OR ");
            }
            builder
                .push(*column)
                .push(" ILIKE ")
                .push_bind(pattern.clone())
                .push(" ESCAPE '\\'");
        }
        builder.push(")");
    }

    if let Some(status) = &query.status {
        builder
            .push(format!(" AND {}.status = ", E::TABLE))
            .push_bind(status.clone());
    }
}

/// `SELECT COUNT(*)` over the filtered rows
pub(crate) fn count_query<E: PgResource>(query: &ListQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", E::FROM));
    push_filters::<E>(&mut builder, query);
    builder
}

/// One page of filtered rows in the requested order
pub(crate) fn page_query<E: PgResource>(query: &ListQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {} FROM {}", E::COLUMNS, E::FROM));
    push_filters::<E>(&mut builder, query);

    let direction = query.direction.as_sql();
    builder.push(format!(
        " ORDER BY {} {}, {}.id {}",
        sort_column::<E>(query.sort_by.as_deref()),
        direction,
        E::TABLE,
        direction
    ));

    if let Some((limit, offset)) = query.limit_offset() {
        builder
            .push(" LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);
    }

    builder
}
