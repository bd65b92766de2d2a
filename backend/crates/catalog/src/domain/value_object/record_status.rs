//! Record Status Value Object

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Accepted spellings, in form validation order
pub const STATUS_VALUES: [&str; 2] = ["active", "inactive"];

/// Visibility flag shared by every catalog entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    #[display("active")]
    Active,
    #[display("inactive")]
    Inactive,
}

impl RecordStatus {
    /// Exact, case-sensitive match
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(RecordStatus::parse("active"), Some(RecordStatus::Active));
        assert_eq!(RecordStatus::parse("inactive"), Some(RecordStatus::Inactive));
        assert_eq!(RecordStatus::parse("Active"), None);
        assert_eq!(RecordStatus::parse(""), None);
    }

    #[test]
    fn test_display_matches_storage() {
        for status in [RecordStatus::Active, RecordStatus::Inactive] {
            assert_eq!(status.to_string(), status.as_str());
        }
    }
}
