//! Secret Token Value Object
//!
//! Random alphanumeric tokens handed out in links (email verification,
//! password reset) and as bearer credentials. Bearer tokens are stored
//! only as their SHA-256 digest.

use std::fmt;

use platform::crypto::{random_alphanumeric, sha256};

/// Length of verification and reset tokens
pub const LINK_TOKEN_LENGTH: usize = 60;

/// Length of bearer tokens
pub const ACCESS_TOKEN_LENGTH: usize = 48;

#[derive(Clone, PartialEq, Eq)]
pub struct SecretToken(String);

impl SecretToken {
    /// Token for email links
    pub fn link_token() -> Self {
        Self(random_alphanumeric(LINK_TOKEN_LENGTH))
    }

    /// Token for the `Authorization` header
    pub fn access_token() -> Self {
        Self(random_alphanumeric(ACCESS_TOKEN_LENGTH))
    }

    /// Token received from a client or loaded from storage
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Digest persisted for bearer tokens
    pub fn digest(&self) -> [u8; 32] {
        sha256(self.0.as_bytes())
    }
}

impl fmt::Debug for SecretToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretToken([REDACTED])")
    }
}
