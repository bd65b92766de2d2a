//! Request field parsing shared by the auth use cases.
//!
//! Each helper records its field messages into a [`FieldErrors`] map and
//! returns the parsed value only when the field is valid.

use kernel::validation::{FieldErrors, label};

use crate::domain::value_object::{email::Email, user_name::UserName, user_password::NewPassword};

pub(crate) fn name(errors: &mut FieldErrors, raw: Option<&str>) -> Option<UserName> {
    match UserName::new(raw.unwrap_or_default()) {
        Ok(name) => Some(name),
        Err(message) => {
            errors.add("name", message);
            None
        }
    }
}

pub(crate) fn email(errors: &mut FieldErrors, raw: Option<&str>) -> Option<Email> {
    match Email::new(raw.unwrap_or_default()) {
        Ok(email) => Some(email),
        Err(e) => {
            errors.add("email", e.to_string());
            None
        }
    }
}

/// Plain required check, used for passwords that are only compared
pub(crate) fn present(
    errors: &mut FieldErrors,
    field: &str,
    raw: Option<String>,
) -> Option<String> {
    errors.required(field, raw.as_deref())?;
    raw
}

/// Required, policy-checked and equal to `{field}_confirmation`
pub(crate) fn new_password(
    errors: &mut FieldErrors,
    field: &str,
    raw: Option<String>,
    confirmation: Option<&str>,
) -> Option<NewPassword> {
    let raw = present(errors, field, raw)?;
    let mismatch = confirmation != Some(raw.as_str());

    let password = match NewPassword::new(raw) {
        Ok(password) => Some(password),
        Err(e) => {
            errors.add(field, e.field_message(&label(field)));
            None
        }
    };

    if mismatch {
        errors.add(
            field,
            format!("The {} field confirmation does not match.", label(field)),
        );
        return None;
    }
    password
}
