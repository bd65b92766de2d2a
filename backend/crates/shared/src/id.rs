//! Common ID Types
//!
//! Type-safe wrappers over the numeric surrogate keys (`BIGSERIAL`) of every table.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Generic typed ID wrapper
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type BrandId = Id<markers::Brand>;
///
/// let id = BrandId::new(42);
/// assert_eq!(id.get(), 42);
/// ```
pub struct Id<T> {
    value: i64,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    /// Wrap a database key
    pub const fn new(value: i64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    /// Get the underlying key
    pub const fn get(&self) -> i64 {
        self.value
    }
}

// Manual impls: markers are bare structs and need no bounds.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<i64> for Id<T> {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl<T> From<Id<T>> for i64 {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.value)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i64::deserialize(deserializer).map(Self::new)
    }
}

/// Marker types for different entity IDs
pub mod markers {
    pub struct User;
    pub struct AccessToken;
    pub struct Category;
    pub struct SubCategory;
    pub struct Brand;
    pub struct Color;
    pub struct Product;
}

pub type UserId = Id<markers::User>;
pub type AccessTokenId = Id<markers::AccessToken>;
pub type CategoryId = Id<markers::Category>;
pub type SubCategoryId = Id<markers::SubCategory>;
pub type BrandId = Id<markers::Brand>;
pub type ColorId = Id<markers::Color>;
pub type ProductId = Id<markers::Product>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip_through_i64() {
        let id = CategoryId::new(7);
        let raw: i64 = id.into();
        assert_eq!(raw, 7);
        assert_eq!(CategoryId::from(raw), id);
    }

    #[test]
    fn test_id_serializes_as_number() {
        let id = ProductId::new(12);
        assert_eq!(serde_json::to_string(&id).unwrap(), "12");

        let parsed: ProductId = serde_json::from_str("12").unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_id_is_copy_without_marker_bounds() {
        let a = BrandId::new(1);
        let b = a;
        assert_eq!(a, b);
        assert_eq!(format!("{:?}", a), "Id(1)");
    }
}
