use kernel::id::{BrandId, CategoryId, ColorId, SubCategoryId};
use kernel::validation::{FieldErrors, label};

use super::image::{ImageFormat, ImageRules};
use super::{FormInput, Parsed, ReferenceField, ResourceForm, name, status};
use crate::domain::entity::{Product, ProductDraft};
use crate::domain::resource::ReferenceTarget;
use crate::domain::value_object::featured::{FEATURED_VALUES, Featured};
use crate::domain::value_object::price::{Price, PriceError};

pub const DESCRIPTION_MIN_CHARS: usize = 10;

pub const COMPARE_PRICE_MESSAGE: &str = "The compare price must be greater than the actual price.";

const CATEGORY: ReferenceField = ReferenceField {
    field: "category_id",
    target: ReferenceTarget::Category,
    required_message: Some("The category is required."),
    missing_message: "The selected category does not exist.",
};

const SUB_CATEGORY: ReferenceField = ReferenceField {
    field: "sub_category_id",
    target: ReferenceTarget::SubCategory,
    required_message: None,
    missing_message: "The selected subcategory does not exist.",
};

const BRAND: ReferenceField = ReferenceField {
    field: "brand_id",
    target: ReferenceTarget::Brand,
    required_message: None,
    missing_message: "The selected brand does not exist.",
};

const COLOR: ReferenceField = ReferenceField {
    field: "color_id",
    target: ReferenceTarget::Color,
    required_message: None,
    missing_message: "The selected color does not exist.",
};

fn price_message(field: &str, error: PriceError) -> String {
    match (field, error) {
        ("price", PriceError::NotNumeric) => "The price must be a number.".to_string(),
        (_, e) => format!("The {} field {}.", label(field), e),
    }
}

impl ResourceForm for Product {
    const IMAGE: Option<ImageRules> = Some(ImageRules {
        dir: "products",
        allowed: &[ImageFormat::Jpeg, ImageFormat::Png, ImageFormat::Webp],
        mimes: "jpeg, png, jpg, webp",
        required_on_create: true,
        not_image_message: Some("The uploaded file must be an image."),
        too_large_message: Some("The image must not be larger than 2MB."),
    });

    fn parse(form: &FormInput, errors: &mut FieldErrors) -> Parsed<ProductDraft> {
        let mut references = Vec::new();

        let name = name(form, errors, Some("The product name is required."));

        let description = errors.required("description", form.text("description")).and_then(|d| {
            let before = errors.len();
            errors.min_chars("description", d, DESCRIPTION_MIN_CHARS);
            (errors.len() == before).then(|| d.to_string())
        });

        let price = errors
            .required("price", form.text("price"))
            .and_then(|raw| match Price::parse(raw) {
                Ok(price) => Some(price),
                Err(e) => {
                    errors.add("price", price_message("price", e));
                    None
                }
            });

        // Outer `None` marks an invalid value
        let compare_price = match form.text("compare_price") {
            None => Some(None),
            Some(raw) => match Price::parse(raw) {
                Ok(compare) if price.is_some_and(|p| compare <= p) => {
                    errors.add("compare_price", COMPARE_PRICE_MESSAGE);
                    None
                }
                Ok(compare) => Some(Some(compare)),
                Err(PriceError::Negative) => {
                    errors.add("compare_price", COMPARE_PRICE_MESSAGE);
                    None
                }
                Err(e) => {
                    errors.add("compare_price", price_message("compare_price", e));
                    None
                }
            },
        };

        let is_featured = errors
            .required("is_featured", form.text("is_featured"))
            .and_then(|raw| {
                let parsed = Featured::parse(raw);
                if parsed.is_none() {
                    errors.one_of("is_featured", raw, &FEATURED_VALUES);
                }
                parsed
            });

        let status = status(form, errors);

        let category_id = CATEGORY.parse(form, errors, &mut references).flatten();
        let sub_category_id = SUB_CATEGORY.parse(form, errors, &mut references);
        let brand_id = BRAND.parse(form, errors, &mut references);
        let color_id = COLOR.parse(form, errors, &mut references);

        let draft = (|| {
            Some(ProductDraft {
                name: name?,
                description: description?,
                price: price?,
                compare_price: compare_price?,
                is_featured: is_featured?,
                status: status?,
                category_id: CategoryId::new(category_id?),
                sub_category_id: sub_category_id?.map(SubCategoryId::new),
                brand_id: brand_id?.map(BrandId::new),
                color_id: color_id?.map(ColorId::new),
            })
        })();

        Parsed { draft, references }
    }
}
