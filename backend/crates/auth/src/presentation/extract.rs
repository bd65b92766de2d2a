//! JSON body extractor whose rejections render as [`AuthError`]

use axum::extract::FromRequest;

use crate::error::AuthError;

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AuthError))]
pub struct JsonBody<T>(pub T);
