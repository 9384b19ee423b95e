//! Rules for property photo uploads.

use crate::error::CoreError;

/// MIME types accepted for property photos.
pub const ALLOWED_MIME_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png", "image/webp"];

/// Maximum size of a single photo (5 MiB).
pub const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;

/// Maximum number of photos accepted in one request.
pub const MAX_PHOTOS_PER_REQUEST: usize = 10;

/// Object key prefix for property photos.
pub const PHOTO_KEY_PREFIX: &str = "properties";

/// Check a single uploaded photo against the type and size limits.
pub fn validate_photo(content_type: &str, size: usize) -> Result<(), CoreError> {
    if !ALLOWED_MIME_TYPES.contains(&content_type) {
        return Err(CoreError::Validation(
            "Invalid file type. Only JPEG, JPG, PNG and WEBP are allowed".into(),
        ));
    }
    if size > MAX_PHOTO_BYTES {
        return Err(CoreError::Validation(format!(
            "Photo exceeds the maximum size of {MAX_PHOTO_BYTES} bytes"
        )));
    }
    Ok(())
}

/// Check the number of photos in one request.
pub fn validate_photo_count(count: usize) -> Result<(), CoreError> {
    if count > MAX_PHOTOS_PER_REQUEST {
        return Err(CoreError::Validation(format!(
            "At most {MAX_PHOTOS_PER_REQUEST} photos may be uploaded at once"
        )));
    }
    Ok(())
}

/// Build the storage key for a photo: `properties/{millis}-{filename}`.
///
/// Directory components are stripped from `filename` and anything outside
/// `[A-Za-z0-9._-]` is replaced with `-`.
pub fn photo_object_key(unix_millis: i64, filename: &str) -> String {
    let basename = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();

    let sanitized: String = basename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '-'
            }
        })
        .collect();

    let name = match sanitized.trim_matches('.') {
        "" => "photo",
        trimmed => trimmed,
    };

    format!("{PHOTO_KEY_PREFIX}/{unix_millis}-{name}")
}
