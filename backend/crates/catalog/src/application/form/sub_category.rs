use kernel::id::CategoryId;
use kernel::validation::FieldErrors;

use super::image::ImageRules;
use super::{FormInput, Parsed, ReferenceField, ResourceForm, name, status};
use crate::domain::entity::{SubCategory, SubCategoryDraft};
use crate::domain::resource::ReferenceTarget;

const CATEGORY: ReferenceField = ReferenceField {
    field: "category_id",
    target: ReferenceTarget::Category,
    required_message: Some("The category id field is required."),
    missing_message: "The selected category id is invalid.",
};

impl ResourceForm for SubCategory {
    const IMAGE: Option<ImageRules> = None;

    fn parse(form: &FormInput, errors: &mut FieldErrors) -> Parsed<SubCategoryDraft> {
        let mut references = Vec::new();

        let name = name(form, errors, None);
        let status = status(form, errors);
        let category_id = CATEGORY.parse(form, errors, &mut references).flatten();

        let draft = match (name, status, category_id) {
            (Some(name), Some(status), Some(category_id)) => Some(SubCategoryDraft {
                name,
                status,
                category_id: CategoryId::new(category_id),
            }),
            _ => None,
        };

        Parsed { draft, references }
    }
}
