//! Value Object Module

pub mod email;
pub mod secret_token;
pub mod user_name;
pub mod user_password;
