//! Brands and colors share one form: a name and a status.

use kernel::validation::FieldErrors;

use super::image::ImageRules;
use super::{FormInput, Parsed, ResourceForm, name, status};
use crate::domain::entity::{Brand, Color, NamedDraft};

fn parse_named(form: &FormInput, errors: &mut FieldErrors) -> Parsed<NamedDraft> {
    let name = name(form, errors, None);
    let status = status(form, errors);

    Parsed {
        draft: name
            .zip(status)
            .map(|(name, status)| NamedDraft { name, status }),
        references: Vec::new(),
    }
}

impl ResourceForm for Brand {
    const IMAGE: Option<ImageRules> = None;

    fn parse(form: &FormInput, errors: &mut FieldErrors) -> Parsed<NamedDraft> {
        parse_named(form, errors)
    }
}

impl ResourceForm for Color {
    const IMAGE: Option<ImageRules> = None;

    fn parse(form: &FormInput, errors: &mut FieldErrors) -> Parsed<NamedDraft> {
        parse_named(form, errors)
    }
}
