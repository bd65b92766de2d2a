//! User Password Value Object
//!
//! Stored password hash of a user. Delegates to `platform::password`
//! for normalization, policy and Argon2id.

use std::fmt;

use platform::password::{ClearTextPassword, HashedPassword, PasswordPolicyError};

use crate::error::{AuthError, AuthResult};

/// Password chosen by the user, checked against the strength policy
pub struct NewPassword(ClearTextPassword);

impl NewPassword {
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        ClearTextPassword::new(raw).map(Self)
    }
}

/// Argon2id hash as stored in `users.password`
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    pub fn from_new(password: &NewPassword, pepper: Option<&[u8]>) -> AuthResult<Self> {
        password
            .0
            .hash(pepper)
            .map(Self)
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    pub fn from_db(phc: impl Into<String>) -> AuthResult<Self> {
        HashedPassword::from_phc_string(phc)
            .map(Self)
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    /// Check a login or confirmation attempt
    pub fn verify(&self, candidate: &str, pepper: Option<&[u8]>) -> bool {
        let candidate = ClearTextPassword::for_verification(candidate.to_string());
        self.0.verify(&candidate, pepper)
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UserPassword([HASH])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let new = NewPassword::new("Blue-Kettle-42".to_string()).unwrap();
        let stored = UserPassword::from_new(&new, None).unwrap();

        assert!(stored.verify("Blue-Kettle-42", None));
        assert!(!stored.verify("blue-kettle-42", None));

        let reloaded = UserPassword::from_db(stored.as_phc_string()).unwrap();
        assert!(reloaded.verify("Blue-Kettle-42", None));
    }

    #[test]
    fn test_policy_applies_to_new_passwords() {
        assert!(matches!(
            NewPassword::new("short".into()),
            Err(PasswordPolicyError::TooShort { .. })
        ));
    }
}
