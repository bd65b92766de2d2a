//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Environment configuration
//! - Cryptographic utilities (SHA-256, random tokens, Base64)
//! - Password hashing (Argon2id)
//! - Bearer token header parsing
//! - Public file storage for uploaded images
//! - Outgoing mail (SMTP or log-only)

pub mod bearer;
pub mod config;
pub mod crypto;
pub mod mail;
pub mod password;
pub mod storage;
