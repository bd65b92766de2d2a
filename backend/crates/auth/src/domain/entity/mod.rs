//! Entity Module

pub mod access_token;
pub mod password_reset;
pub mod user;
