//! Validation - field-keyed error collection
//!
//! Request validation gathers every problem before rejecting, so a single
//! 422 response can name all offending fields. Messages follow the wording
//! clients already display ("The name field is required.").

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::app_error::{AppError, AppResult};

/// Map of field name to its messages, in field order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-field error map
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn merge(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    /// `Ok(())` when nothing was recorded, otherwise a 422 [`AppError`]
    pub fn into_result(self) -> AppResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AppError::validation(self))
        }
    }

    // ========================================================================
    // Rules
    // ========================================================================

    /// Trimmed non-empty value, or records "required"
    pub fn required<'a>(&mut self, field: &str, value: Option<&'a str>) -> Option<&'a str> {
        match value.map(str::trim) {
            Some(v) if !v.is_empty() => Some(v),
            _ => {
                self.add(field, format!("The {} field is required.", label(field)));
                None
            }
        }
    }

    /// Upper bound in characters
    pub fn max_chars(&mut self, field: &str, value: &str, max: usize) {
        if value.chars().count() > max {
            self.add(
                field,
                format!(
                    "The {} field must not be greater than {} characters.",
                    label(field),
                    max
                ),
            );
        }
    }

    /// Lower bound in characters
    pub fn min_chars(&mut self, field: &str, value: &str, min: usize) {
        if value.chars().count() < min {
            self.add(
                field,
                format!("The {} field must be at least {} characters.", label(field), min),
            );
        }
    }

    /// Value must be one of `allowed`
    pub fn one_of(&mut self, field: &str, value: &str, allowed: &[&str]) {
        if !allowed.contains(&value) {
            self.add(field, format!("The selected {} is invalid.", label(field)));
        }
    }

    /// `value` must equal its `_confirmation` companion
    pub fn confirmed(&mut self, field: &str, value: &str, confirmation: Option<&str>) {
        if confirmation != Some(value) {
            self.add(
                field,
                format!("The {} field confirmation does not match.", label(field)),
            );
        }
    }

    /// Records "already taken" when `taken`
    pub fn unique(&mut self, field: &str, taken: bool) {
        if taken {
            self.add(field, format!("The {} has already been taken.", label(field)));
        }
    }

    /// Records "selected ... is invalid" when the referenced row is missing
    pub fn exists(&mut self, field: &str, exists: bool) {
        if !exists {
            self.add(field, format!("The selected {} is invalid.", label(field)));
        }
    }
}

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> Self {
        AppError::validation(errors)
    }
}

/// `sub_category_id` -> `sub category id`
pub fn label(field: &str) -> String {
    field.replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_trims_and_flags_blank() {
        let mut errors = FieldErrors::new();
        assert_eq!(errors.required("name", Some("  Shoes ")), Some("Shoes"));
        assert_eq!(errors.required("name", Some("   ")), None);
        assert_eq!(errors.required("status", None), None);

        assert_eq!(
            errors.get("name"),
            Some(&["The name field is required.".to_string()][..])
        );
        assert!(errors.has("status"));
    }

    #[test]
    fn test_length_rules_count_chars() {
        let mut errors = FieldErrors::new();
        errors.max_chars("name", &"é".repeat(255), 255);
        assert!(errors.is_empty());

        errors.max_chars("name", &"a".repeat(256), 255);
        errors.min_chars("description", "short", 10);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_one_of_and_confirmed() {
        let mut errors = FieldErrors::new();
        errors.one_of("status", "archived", &["active", "inactive"]);
        errors.confirmed("password", "secret-pass", Some("secret-pas"));
        errors.confirmed("new_password", "abc", None);

        assert_eq!(
            errors.get("status"),
            Some(&["The selected status is invalid.".to_string()][..])
        );
        assert_eq!(
            errors.get("new_password"),
            Some(&["The new password field confirmation does not match.".to_string()][..])
        );
    }

    #[test]
    fn test_merge_and_into_result() {
        let mut a = FieldErrors::single("name", "one");
        a.merge(FieldErrors::single("name", "two"));
        assert_eq!(a.get("name").map(|m| m.len()), Some(2));

        let err = a.into_result().unwrap_err();
        assert_eq!(err.status_code(), 422);
        assert!(FieldErrors::new().into_result().is_ok());
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let errors = FieldErrors::single("email", "The email has already been taken.");
        let json = serde_json::to_string(&errors).unwrap();
        assert_eq!(json, r#"{"email":["The email has already been taken."]}"#);
    }
}
