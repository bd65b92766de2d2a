//! Slug Value Object
//!
//! Public identifier of a catalog record, used in every URL. Assigned
//! once at creation and never changed.
//!
//! ## Usage
//! ```rust
//! use catalog::domain::value_object::slug::{Slug, SLUG_LENGTH};
//!
//! let slug = Slug::generate();
//! assert_eq!(slug.as_str().len(), SLUG_LENGTH);
//! ```

use std::fmt;

use nid::{Nanoid, alphabet::Base62Alphabet};
use serde::{Deserialize, Serialize};

pub const SLUG_LENGTH: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Random alphanumeric candidate; uniqueness is checked by the caller
    pub fn generate() -> Self {
        let id: Nanoid<SLUG_LENGTH, Base62Alphabet> = Nanoid::new();
        Self(id.as_str().to_string())
    }

    pub fn from_db(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_alphanumeric() {
        for _ in 0..50 {
            let slug = Slug::generate();
            assert_eq!(slug.as_str().len(), SLUG_LENGTH);
            assert!(slug.as_str().chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_generate_differs() {
        assert_ne!(Slug::generate(), Slug::generate());
    }
}
