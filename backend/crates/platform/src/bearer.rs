//! Bearer Token Header Handling
//!
//! Parsing of `Authorization: Bearer <token>` headers.

use axum::http::{HeaderMap, header};

/// Scheme name used in the `Authorization` header and in `token_type`
pub const BEARER_SCHEME: &str = "Bearer";

/// Extract the bearer token from headers
///
/// The scheme is matched case-insensitively; empty tokens are ignored.
pub fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;

    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return None;
    }

    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
