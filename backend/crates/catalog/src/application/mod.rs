//! Application Layer
//!
//! Use cases shared by every catalog resource.

pub mod config;
pub mod create;
pub mod delete;
mod files;
pub mod form;
pub mod list;
pub mod show;
pub mod slug;
pub mod update;

// Re-exports
pub use config::CatalogConfig;
pub use create::CreateUseCase;
pub use delete::{DeleteManyUseCase, DeleteUseCase};
pub use form::{FormInput, FormMode, ResourceForm, UploadedImage};
pub use list::{ActiveUseCase, ListUseCase};
pub use show::ShowUseCase;
pub use update::UpdateUseCase;
