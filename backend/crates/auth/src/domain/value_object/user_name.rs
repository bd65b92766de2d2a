//! User Name Value Object
//!
//! Display name given at registration.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const USER_NAME_MAX_LENGTH: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserName(String);

impl UserName {
    /// Trimmed, 1..=255 characters. Returns the field message on failure.
    pub fn new(raw: &str) -> Result<Self, &'static str> {
        let name = raw.trim();
        if name.is_empty() {
            return Err("The name field is required.");
        }
        if name.chars().count() > USER_NAME_MAX_LENGTH {
            return Err("The name field must not be greater than 255 characters.");
        }
        Ok(Self(name.to_string()))
    }

    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
