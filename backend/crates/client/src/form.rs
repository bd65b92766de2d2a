//! Multipart form payloads for create and update calls

use reqwest::multipart::{Form, Part};

use crate::error::{ClientError, ClientResult};

/// Image file attached as the `image` part
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(file_name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime: mime.into(),
            bytes,
        }
    }
}

/// Text fields plus an optional image
#[derive(Debug, Clone, Default)]
pub struct FormData {
    fields: Vec<(String, String)>,
    image: Option<ImageFile>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.fields.push((name.into(), value.to_string()));
        self
    }

    /// Set a field only when a value is present
    pub fn optional(self, name: impl Into<String>, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.field(name, value),
            None => self,
        }
    }

    pub fn image(mut self, image: ImageFile) -> Self {
        self.image = Some(image);
        self
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    pub(crate) fn into_multipart(self) -> ClientResult<Form> {
        let mut form = Form::new();
        for (name, value) in self.fields {
            form = form.text(name, value);
        }

        if let Some(image) = self.image {
            let part = Part::bytes(image.bytes)
                .file_name(image.file_name)
                .mime_str(&image.mime)
                .map_err(|e| ClientError::InvalidRequest(format!("image type: {e}")))?;
            form = form.part("image", part);
        }

        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields() {
        let form = FormData::new()
            .field("name", "Shoes")
            .optional("brand_id", None::<i64>)
            .optional("color_id", Some(3));

        assert_eq!(
            form.fields(),
            [
                ("name".to_string(), "Shoes".to_string()),
                ("color_id".to_string(), "3".to_string()),
            ]
        );
        assert!(!form.has_image());
    }

    #[test]
    fn test_bad_mime_rejected() {
        let form = FormData::new().image(ImageFile::new("a.png", "not a mime", vec![1]));
        assert!(matches!(
            form.into_multipart(),
            Err(ClientError::InvalidRequest(_))
        ));
    }
}
