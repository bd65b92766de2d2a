//! Stored image cleanup

use platform::storage::FileStorage;

/// Remove stored files; failures are logged and skipped
pub(crate) async fn remove_files<S: FileStorage>(storage: &S, paths: &[String], resource: &str) {
    for path in paths {
        if let Err(e) = storage.delete(path).await {
            tracing::warn!(resource = %resource, path = %path, error = %e, "Image not removed");
        }
    }
}
