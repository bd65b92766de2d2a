//! Featured Flag Value Object

use derive_more::Display;
use serde::{Deserialize, Serialize};

pub const FEATURED_VALUES: [&str; 2] = ["Yes", "No"];

/// Whether a product is promoted on the storefront
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum Featured {
    #[display("Yes")]
    Yes,
    #[display("No")]
    No,
}

impl Featured {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "Yes" => Some(Self::Yes),
            "No" => Some(Self::No),
            _ => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }
}
