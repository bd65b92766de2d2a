//! Catalog Admin Client
//!
//! Client-side state containers for the admin API:
//! - [`ApiClient`] - base URL, shared bearer token, JSON and multipart calls
//! - [`ResourceStore`] - list/current/errors/pagination cache per resource
//! - [`AuthStore`] - token and signed-in user
//!
//! Every store shares the token of the [`ApiClient`] it was built from, so a
//! login through [`AuthStore`] authenticates all resource stores at once.

pub mod api;
pub mod auth;
pub mod error;
pub mod form;
pub mod model;
pub mod store;

mod tests;

pub use api::ApiClient;
pub use auth::{AuthStore, LoginOutcome, RegisterForm, VerificationStatus};
pub use error::{ClientError, ClientResult};
pub use form::{FormData, ImageFile};
pub use model::{ActiveEntry, Brand, Category, ClientResource, Color, Product, SubCategory, User};
pub use store::ResourceStore;

pub use kernel::query::{ListParams, PaginationMeta};
pub use kernel::validation::FieldErrors;
