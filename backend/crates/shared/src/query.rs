//! List Query - shared vocabulary of every list endpoint
//!
//! Raw query-string parameters are normalized here once. Unknown sort
//! fields are resolved per resource; everything else (page, page size,
//! direction, search term, status filter) is resource-agnostic.

use serde::{Deserialize, Deserializer, Serialize};

/// Page size when `per_page` is missing or unusable
pub const DEFAULT_PER_PAGE: u32 = 10;

/// `per_page` sentinel meaning "return every row"
pub const ALL_ROWS: i64 = -1;

// ============================================================================
// Raw parameters
// ============================================================================

/// Query string of a list request, as sent by clients
///
/// Unparsable `page`/`per_page` values read as absent so they fall back to
/// their defaults instead of rejecting the request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListParams {
    #[serde(default, deserialize_with = "lenient_int")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub per_page: Option<i64>,
    pub search: Option<String>,
    pub status: Option<String>,
    pub sort_by: Option<String>,
    pub sort_direction: Option<String>,
}

fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Int(n)) => Some(n),
        Some(Raw::Text(text)) => text.trim().parse().ok(),
        Some(Raw::Other(_)) | None => None,
    })
}

// ============================================================================
// Sort direction
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// `asc` / `desc` (any case); anything else falls back to `Desc`
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("asc") => Self::Asc,
            _ => Self::Desc,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

// ============================================================================
// Page size
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSize {
    /// No pagination
    All,
    Limited(u32),
}

impl PageSize {
    /// `-1` means all rows; missing, zero or other negatives use the default
    pub fn from_param(raw: Option<i64>) -> Self {
        match raw {
            Some(ALL_ROWS) => Self::All,
            Some(n) if n > 0 => Self::Limited(u32::try_from(n).unwrap_or(u32::MAX)),
            _ => Self::Limited(DEFAULT_PER_PAGE),
        }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::Limited(DEFAULT_PER_PAGE)
    }
}

// ============================================================================
// Normalized query
// ============================================================================

/// Normalized list request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// 1-based
    pub page: u32,
    pub page_size: PageSize,
    /// Trimmed, never empty
    pub search: Option<String>,
    /// Exact status filter, never empty
    pub status: Option<String>,
    /// Requested sort key, resolved against an allow-list later
    pub sort_by: Option<String>,
    pub direction: SortDirection,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: PageSize::default(),
            search: None,
            status: None,
            sort_by: None,
            direction: SortDirection::default(),
        }
    }
}

impl ListQuery {
    /// SQL `LIMIT`/`OFFSET`, or `None` for unpaginated requests
    pub fn limit_offset(&self) -> Option<(i64, i64)> {
        match self.page_size {
            PageSize::All => None,
            PageSize::Limited(size) => {
                let size = i64::from(size);
                let skipped = i64::from(self.page.saturating_sub(1));
                Some((size, skipped.saturating_mul(size)))
            }
        }
    }

    /// Metadata for a result with `total` matching rows
    pub fn meta(&self, total: u64) -> PaginationMeta {
        match self.page_size {
            PageSize::All => PaginationMeta::all(total),
            PageSize::Limited(size) => PaginationMeta::new(self.page, size, total),
        }
    }
}

impl From<ListParams> for ListQuery {
    fn from(params: ListParams) -> Self {
        let non_empty = |s: Option<String>| {
            s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
        };

        let page = params
            .page
            .filter(|p| *p >= 1)
            .map(|p| u32::try_from(p).unwrap_or(u32::MAX))
            .unwrap_or(1);

        Self {
            page,
            page_size: PageSize::from_param(params.per_page),
            search: non_empty(params.search),
            status: non_empty(params.status),
            sort_by: non_empty(params.sort_by),
            direction: SortDirection::parse_or_default(params.sort_direction.as_deref()),
        }
    }
}

// ============================================================================
// Pagination metadata
// ============================================================================

/// `meta` block of a list response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub current_page: u32,
    pub last_page: u32,
    pub per_page: u64,
    pub total: u64,
}

impl PaginationMeta {
    pub fn new(page: u32, per_page: u32, total: u64) -> Self {
        let per_page = u64::from(per_page.max(1));
        let last_page = total.div_ceil(per_page).max(1);
        Self {
            current_page: page.max(1),
            last_page: u32::try_from(last_page).unwrap_or(u32::MAX),
            per_page,
            total,
        }
    }

    /// Single page holding every row
    pub fn all(total: u64) -> Self {
        Self {
            current_page: 1,
            last_page: 1,
            per_page: total,
            total,
        }
    }
}

/// `{data, meta}` envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, meta: PaginationMeta) -> Self {
        Self { data, meta }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            data: self.data.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }

    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<Paginated<U>, E> {
        Ok(Paginated {
            data: self.data.into_iter().map(f).collect::<Result<_, _>>()?,
            meta: self.meta,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_falls_back_to_desc() {
        assert_eq!(SortDirection::parse_or_default(Some("asc")), SortDirection::Asc);
        assert_eq!(SortDirection::parse_or_default(Some("ASC")), SortDirection::Asc);
        assert_eq!(SortDirection::parse_or_default(Some("sideways")), SortDirection::Desc);
        assert_eq!(SortDirection::parse_or_default(None), SortDirection::Desc);
    }

    #[test]
    fn test_page_size_sentinel() {
        assert_eq!(PageSize::from_param(Some(-1)), PageSize::All);
        assert_eq!(PageSize::from_param(Some(25)), PageSize::Limited(25));
        assert_eq!(PageSize::from_param(Some(0)), PageSize::Limited(DEFAULT_PER_PAGE));
        assert_eq!(PageSize::from_param(Some(-7)), PageSize::Limited(DEFAULT_PER_PAGE));
        assert_eq!(PageSize::from_param(None), PageSize::Limited(DEFAULT_PER_PAGE));
    }

    #[test]
    fn test_params_normalization() {
        let query = ListQuery::from(ListParams {
            page: Some(0),
            per_page: Some(5),
            search: Some("  ".into()),
            status: Some("active".into()),
            sort_by: Some(" name ".into()),
            sort_direction: Some("asc".into()),
        });

        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, PageSize::Limited(5));
        assert_eq!(query.search, None);
        assert_eq!(query.status.as_deref(), Some("active"));
        assert_eq!(query.sort_by.as_deref(), Some("name"));
        assert_eq!(query.direction, SortDirection::Asc);
    }

    #[test]
    fn test_limit_offset() {
        let query = ListQuery {
            page: 3,
            page_size: PageSize::Limited(10),
            ..Default::default()
        };
        assert_eq!(query.limit_offset(), Some((10, 20)));

        let all = ListQuery {
            page_size: PageSize::All,
            ..Default::default()
        };
        assert_eq!(all.limit_offset(), None);
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        let query = ListQuery::from(ListParams {
            page: Some(i64::MAX),
            per_page: Some(i64::MAX),
            ..Default::default()
        });

        let (limit, offset) = query.limit_offset().unwrap();
        assert_eq!(limit, i64::from(u32::MAX));
        assert_eq!(offset, i64::MAX);

        let meta = query.meta(3);
        assert_eq!(meta.current_page, u32::MAX);
        assert_eq!(meta.last_page, 1);
    }

    #[test]
    fn test_unparsable_numbers_use_defaults() {
        let params: ListParams =
            serde_urlencoded::from_str("page=abc&per_page=all&search=red").unwrap();
        assert_eq!(params.page, None);
        assert_eq!(params.per_page, None);

        let query = ListQuery::from(params);
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, PageSize::Limited(DEFAULT_PER_PAGE));
        assert_eq!(query.search.as_deref(), Some("red"));

        let params: ListParams = serde_urlencoded::from_str("page=2&per_page=-1").unwrap();
        assert_eq!(params.page, Some(2));
        assert_eq!(params.per_page, Some(ALL_ROWS));

        let params: ListParams =
            serde_json::from_value(serde_json::json!({"page": 3, "per_page": "5"})).unwrap();
        assert_eq!(params.page, Some(3));
        assert_eq!(params.per_page, Some(5));
    }

    #[test]
    fn test_meta_last_page() {
        let meta = PaginationMeta::new(1, 10, 21);
        assert_eq!(meta.last_page, 3);
        assert_eq!(meta.per_page, 10);

        let empty = PaginationMeta::new(1, 10, 0);
        assert_eq!(empty.last_page, 1);
    }

    #[test]
    fn test_meta_for_all_rows() {
        let meta = ListQuery {
            page: 4,
            page_size: PageSize::All,
            ..Default::default()
        }
        .meta(37);

        assert_eq!(
            meta,
            PaginationMeta {
                current_page: 1,
                last_page: 1,
                per_page: 37,
                total: 37
            }
        );
    }

    #[test]
    fn test_paginated_map_keeps_meta() {
        let page = Paginated::new(vec![1, 2, 3], PaginationMeta::all(3)).map(|n| n * 2);
        assert_eq!(page.data, vec![2, 4, 6]);
        assert_eq!(page.meta.total, 3);
    }
}
