use kernel::validation::FieldErrors;

use super::image::{ImageFormat, ImageRules};
use super::{FormInput, Parsed, ResourceForm, name, status};
use crate::domain::entity::{Category, CategoryDraft};

impl ResourceForm for Category {
    const IMAGE: Option<ImageRules> = Some(ImageRules {
        dir: "categories",
        allowed: &[
            ImageFormat::Jpeg,
            ImageFormat::Png,
            ImageFormat::Gif,
            ImageFormat::Webp,
        ],
        mimes: "jpeg, png, jpg, gif, webp",
        required_on_create: true,
        not_image_message: None,
        too_large_message: None,
    });

    fn parse(form: &FormInput, errors: &mut FieldErrors) -> Parsed<CategoryDraft> {
        let name = name(form, errors, None);
        let status = status(form, errors);

        Parsed {
            draft: name
                .zip(status)
                .map(|(name, status)| CategoryDraft { name, status }),
            references: Vec::new(),
        }
    }
}
