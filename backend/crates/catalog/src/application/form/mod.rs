//! Form parsing and validation
//!
//! Create and update requests arrive as flat string maps (multipart,
//! urlencoded or JSON) plus an optional image. Each entity parses the map
//! into its draft; the shared [`validate`] step adds the checks that need
//! the database (name uniqueness, foreign keys) and the image rules.

mod brand;
mod category;
pub mod image;
mod product;
mod sub_category;

use std::collections::BTreeMap;

use kernel::validation::FieldErrors;

use crate::application::config::CatalogConfig;
use crate::domain::repository::{ReferenceLookup, ResourceRepository};
use crate::domain::resource::{Reference, ReferenceTarget, Resource};
use crate::domain::value_object::record_status::{RecordStatus, STATUS_VALUES};
use crate::error::{CatalogError, CatalogResult, ensure_valid};

pub use image::{ImageFormat, ImageRules, ValidImage};

/// Upper bound of every name field
pub const NAME_MAX_CHARS: usize = 255;

/// File part of a form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Request body of a create or update call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub fields: BTreeMap<String, String>,
    pub image: Option<UploadedImage>,
}

impl FormInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn with_image(mut self, image: UploadedImage) -> Self {
        self.image = Some(image);
        self
    }

    /// Trimmed value; blank counts as missing
    pub fn text(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Update,
}

/// Outcome of the database-free part of validation
#[derive(Debug)]
pub struct Parsed<D> {
    /// Present only when every field parsed
    pub draft: Option<D>,
    /// Foreign keys still to be checked
    pub references: Vec<Reference>,
}

/// Form rules of one entity
pub trait ResourceForm: Resource {
    /// Upload policy; `None` for entities without an image
    const IMAGE: Option<ImageRules>;

    fn parse(form: &FormInput, errors: &mut FieldErrors) -> Parsed<Self::Draft>;
}

/// Draft and image ready to be written
#[derive(Debug)]
pub struct Validated<D> {
    pub draft: D,
    pub image: Option<ValidImage>,
}

/// Run every rule of `E` against `form`; all messages are gathered before
/// rejecting. `except` is the row being updated.
pub async fn validate<E, R>(
    repo: &R,
    form: &FormInput,
    mode: FormMode,
    except: Option<i64>,
    config: &CatalogConfig,
) -> CatalogResult<Validated<E::Draft>>
where
    E: ResourceForm,
    R: ResourceRepository<E> + ReferenceLookup,
{
    let mut errors = FieldErrors::new();
    let parsed = E::parse(form, &mut errors);

    if E::UNIQUE_NAME && !errors.has("name") {
        if let Some(name) = form.text("name") {
            errors.unique("name", repo.name_taken(name, except).await?);
        }
    }

    for reference in &parsed.references {
        if !repo.reference_exists(reference.target, reference.id).await? {
            errors.add(reference.field, reference.message.clone());
        }
    }

    let image = E::IMAGE.and_then(|rules| {
        rules.check(
            &mut errors,
            form.image.as_ref(),
            mode == FormMode::Create && rules.required_on_create,
            config.max_image_bytes,
        )
    });

    let Some(draft) = parsed.draft else {
        return Err(CatalogError::Validation(errors));
    };
    ensure_valid(errors)?;

    Ok(Validated { draft, image })
}

// ============================================================================
// Field helpers
// ============================================================================

/// Required name of at most [`NAME_MAX_CHARS`]
pub(crate) fn name(
    form: &FormInput,
    errors: &mut FieldErrors,
    required_message: Option<&str>,
) -> Option<String> {
    let Some(value) = form.text("name") else {
        match required_message {
            Some(message) => errors.add("name", message),
            None => {
                errors.required("name", None);
            }
        }
        return None;
    };

    let before = errors.len();
    errors.max_chars("name", value, NAME_MAX_CHARS);
    (errors.len() == before).then(|| value.to_string())
}

pub(crate) fn status(form: &FormInput, errors: &mut FieldErrors) -> Option<RecordStatus> {
    let value = errors.required("status", form.text("status"))?;
    let parsed = RecordStatus::parse(value);
    if parsed.is_none() {
        errors.one_of("status", value, &STATUS_VALUES);
    }
    parsed
}

/// Foreign key field
pub(crate) struct ReferenceField {
    pub field: &'static str,
    pub target: ReferenceTarget,
    /// Message when absent; `None` makes the field optional
    pub required_message: Option<&'static str>,
    /// Message when the row does not exist
    pub missing_message: &'static str,
}

impl ReferenceField {
    /// `Some(None)` for an absent optional key, `None` when invalid.
    /// Existing ids are queued in `references` for the database check.
    pub(crate) fn parse(
        &self,
        form: &FormInput,
        errors: &mut FieldErrors,
        references: &mut Vec<Reference>,
    ) -> Option<Option<i64>> {
        let Some(raw) = form.text(self.field) else {
            if let Some(message) = self.required_message {
                errors.add(self.field, message);
                return None;
            }
            return Some(None);
        };

        match raw.parse::<i64>() {
            Ok(id) if id > 0 => {
                references.push(Reference {
                    field: self.field,
                    target: self.target,
                    id,
                    message: self.missing_message.to_string(),
                });
                Some(Some(id))
            }
            _ => {
                errors.add(self.field, self.missing_message);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_trims_and_drops_blank() {
        let form = FormInput::new()
            .with_field("name", "  Shoes ")
            .with_field("status", "   ");
        assert_eq!(form.text("name"), Some("Shoes"));
        assert_eq!(form.text("status"), None);
        assert_eq!(form.text("missing"), None);
    }

    #[test]
    fn test_name_rules() {
        let mut errors = FieldErrors::new();
        assert_eq!(name(&FormInput::new(), &mut errors, None), None);
        assert_eq!(errors.get("name").unwrap(), ["The name field is required.".to_string()]);

        let mut errors = FieldErrors::new();
        name(&FormInput::new(), &mut errors, Some("The product name is required."));
        assert_eq!(errors.get("name").unwrap(), ["The product name is required.".to_string()]);

        let mut errors = FieldErrors::new();
        let long = FormInput::new().with_field("name", "x".repeat(256));
        assert_eq!(name(&long, &mut errors, None), None);
        assert!(errors.has("name"));
    }

    #[test]
    fn test_status_rules() {
        let mut errors = FieldErrors::new();
        let form = FormInput::new().with_field("status", "archived");
        assert_eq!(status(&form, &mut errors), None);
        assert_eq!(errors.get("status").unwrap(), ["The selected status is invalid.".to_string()]);

        let mut errors = FieldErrors::new();
        let form = FormInput::new().with_field("status", "inactive");
        assert_eq!(status(&form, &mut errors), Some(RecordStatus::Inactive));
    }

    #[test]
    fn test_reference_field() {
        let field = ReferenceField {
            field: "brand_id",
            target: ReferenceTarget::Brand,
            required_message: None,
            missing_message: "The selected brand does not exist.",
        };

        let mut errors = FieldErrors::new();
        let mut refs = Vec::new();
        assert_eq!(field.parse(&FormInput::new(), &mut errors, &mut refs), Some(None));
        assert!(refs.is_empty());

        let form = FormInput::new().with_field("brand_id", "7");
        assert_eq!(field.parse(&form, &mut errors, &mut refs), Some(Some(7)));
        assert_eq!(refs[0].id, 7);

        let form = FormInput::new().with_field("brand_id", "seven");
        assert_eq!(field.parse(&form, &mut errors, &mut refs), None);
        assert_eq!(
            errors.get("brand_id").unwrap(),
            ["The selected brand does not exist.".to_string()]
        );
    }
}
