//! Application Configuration
//!
//! Configuration for the Catalog application layer.

/// Catalog application configuration
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Upper bound of an uploaded image
    pub max_image_bytes: usize,
    /// Slug candidates tried before giving up
    pub slug_attempts: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            max_image_bytes: 2048 * 1024, // 2 MB
            slug_attempts: 10,
        }
    }
}

impl CatalogConfig {
    /// Config for local development
    pub fn development() -> Self {
        Self::default()
    }

    /// Limit expressed the way validation messages print it
    pub fn max_image_kilobytes(&self) -> usize {
        self.max_image_bytes / 1024
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CatalogConfig::default();
        assert_eq!(config.max_image_kilobytes(), 2048);
        assert!(config.slug_attempts > 0);
    }
}
