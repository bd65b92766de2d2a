//! Image upload rules
//!
//! The format is taken from the file signature, never from the client's
//! file name or content type.

use kernel::validation::FieldErrors;

use super::UploadedImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    Webp,
}

impl ImageFormat {
    /// Detect from magic bytes
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [0xFF, 0xD8, 0xFF, ..] => Some(Self::Jpeg),
            [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, ..] => Some(Self::Png),
            [b'G', b'I', b'F', b'8', b'7' | b'9', b'a', ..] => Some(Self::Gif),
            [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some(Self::Webp),
            _ => None,
        }
    }

    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Webp => "webp",
        }
    }
}

/// Per-entity upload policy
#[derive(Debug, Clone, Copy)]
pub struct ImageRules {
    /// Storage directory
    pub dir: &'static str,
    pub allowed: &'static [ImageFormat],
    /// Extensions listed in the "file of type" message
    pub mimes: &'static str,
    pub required_on_create: bool,
    /// Overrides for the stock messages
    pub not_image_message: Option<&'static str>,
    pub too_large_message: Option<&'static str>,
}

/// Image accepted for storage
#[derive(Debug, Clone)]
pub struct ValidImage {
    pub format: ImageFormat,
    pub bytes: Vec<u8>,
}

impl ImageRules {
    /// Check an optional upload, recording messages under `image`
    pub fn check(
        &self,
        errors: &mut FieldErrors,
        upload: Option<&UploadedImage>,
        required: bool,
        max_bytes: usize,
    ) -> Option<ValidImage> {
        let Some(upload) = upload.filter(|u| !u.bytes.is_empty()) else {
            if required {
                errors.add("image", "The image field is required.");
            }
            return None;
        };

        let format = ImageFormat::sniff(&upload.bytes);
        let mut valid = true;

        match format {
            None => {
                errors.add(
                    "image",
                    self.not_image_message.unwrap_or("The image field must be an image."),
                );
                errors.add(
                    "image",
                    format!("The image field must be a file of type: {}.", self.mimes),
                );
                valid = false;
            }
            Some(f) if !self.allowed.contains(&f) => {
                errors.add(
                    "image",
                    format!("The image field must be a file of type: {}.", self.mimes),
                );
                valid = false;
            }
            Some(_) => {}
        }

        if upload.bytes.len() > max_bytes {
            let message = match self.too_large_message {
                Some(m) => m.to_string(),
                None => format!(
                    "The image field must not be greater than {} kilobytes.",
                    max_bytes / 1024
                ),
            };
            errors.add("image", message);
            valid = false;
        }

        match (valid, format) {
            (true, Some(format)) => Some(ValidImage {
                format,
                bytes: upload.bytes.clone(),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULES: ImageRules = ImageRules {
        dir: "products",
        allowed: &[ImageFormat::Jpeg, ImageFormat::Png, ImageFormat::Webp],
        mimes: "jpeg, png, jpg, webp",
        required_on_create: true,
        not_image_message: Some("The uploaded file must be an image."),
        too_large_message: Some("The image must not be larger than 2MB."),
    };

    fn upload(bytes: &[u8]) -> UploadedImage {
        UploadedImage {
            file_name: Some("photo.png".into()),
            content_type: Some("image/png".into()),
            bytes: bytes.to_vec(),
        }
    }

    #[test]
    fn test_sniff() {
        assert_eq!(ImageFormat::sniff(b"\xFF\xD8\xFF\xE0rest"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::sniff(b"\x89PNG\r\n\x1a\n...."), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::sniff(b"GIF89a..."), Some(ImageFormat::Gif));
        assert_eq!(ImageFormat::sniff(b"RIFF\0\0\0\0WEBPVP8 "), Some(ImageFormat::Webp));
        assert_eq!(ImageFormat::sniff(b"%PDF-1.7"), None);
    }

    #[test]
    fn test_missing_required() {
        let mut errors = FieldErrors::new();
        assert!(RULES.check(&mut errors, None, true, 1024).is_none());
        assert_eq!(errors.get("image").unwrap(), ["The image field is required.".to_string()]);

        let mut errors = FieldErrors::new();
        assert!(RULES.check(&mut errors, None, false, 1024).is_none());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_not_an_image() {
        let mut errors = FieldErrors::new();
        assert!(RULES.check(&mut errors, Some(&upload(b"plain text")), true, 1024).is_none());
        assert_eq!(errors.get("image").unwrap()[0], "The uploaded file must be an image.");
    }

    #[test]
    fn test_disallowed_format() {
        let mut errors = FieldErrors::new();
        assert!(RULES.check(&mut errors, Some(&upload(b"GIF89a....")), true, 1024).is_none());
        assert_eq!(
            errors.get("image").unwrap(),
            ["The image field must be a file of type: jpeg, png, jpg, webp.".to_string()]
        );
    }

    #[test]
    fn test_too_large() {
        let mut bytes = b"\x89PNG\r\n\x1a\n".to_vec();
        bytes.resize(2048, 0);

        let mut errors = FieldErrors::new();
        assert!(RULES.check(&mut errors, Some(&upload(&bytes)), true, 1024).is_none());
        assert_eq!(
            errors.get("image").unwrap(),
            ["The image must not be larger than 2MB.".to_string()]
        );
    }

    #[test]
    fn test_accepts_valid_png() {
        let mut errors = FieldErrors::new();
        let image = RULES
            .check(&mut errors, Some(&upload(b"\x89PNG\r\n\x1a\nbody")), true, 1024)
            .unwrap();
        assert_eq!(image.format.extension(), "png");
        assert!(errors.is_empty());
    }
}
