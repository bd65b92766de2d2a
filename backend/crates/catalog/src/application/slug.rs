//! Slug assignment
//!
//! Candidates are drawn from a generator and checked against an existence
//! lookup until a free one is found.

use std::future::Future;

use crate::domain::value_object::slug::Slug;
use crate::error::{CatalogError, CatalogResult};

/// First candidate for which `exists` answers `false`
pub async fn unique_slug<G, X, F>(mut generate: G, exists: X, attempts: u32) -> CatalogResult<Slug>
where
    G: FnMut() -> Slug,
    X: Fn(Slug) -> F,
    F: Future<Output = CatalogResult<bool>>,
{
    for _ in 0..attempts {
        let candidate = generate();
        if !exists(candidate.clone()).await? {
            return Ok(candidate);
        }
        tracing::debug!(slug = %candidate, "Slug collision, retrying");
    }

    Err(CatalogError::Internal(format!(
        "no free slug after {} attempts",
        attempts
    )))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashSet;

    use super::*;

    #[tokio::test]
    async fn test_skips_taken_candidates() {
        let taken: HashSet<&str> = ["aaaaaaaa", "bbbbbbbb"].into_iter().collect();
        let queue = RefCell::new(vec!["cccccccc", "bbbbbbbb", "aaaaaaaa"]);

        let slug = unique_slug(
            || Slug::from_db(queue.borrow_mut().pop().unwrap_or("zzzzzzzz")),
            |s: Slug| {
                let hit = taken.contains(s.as_str());
                async move { Ok(hit) }
            },
            5,
        )
        .await
        .unwrap();

        assert_eq!(slug.as_str(), "cccccccc");
    }

    #[tokio::test]
    async fn test_gives_up() {
        let result = unique_slug(
            || Slug::from_db("aaaaaaaa"),
            |_| async { Ok(true) },
            3,
        )
        .await;
        assert!(matches!(result, Err(CatalogError::Internal(_))));
    }

    #[tokio::test]
    async fn test_generated_slug_is_accepted() {
        let slug = unique_slug(Slug::generate, |_| async { Ok(false) }, 1)
            .await
            .unwrap();
        assert_eq!(slug.as_str().len(), 8);
    }
}
