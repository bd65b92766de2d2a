//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{
    access_token::AccessToken,
    password_reset::PasswordReset,
    user::{NewUser, User},
};
pub use repository::{AccessTokenRepository, PasswordResetRepository, UserRepository};
