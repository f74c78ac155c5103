//! Caller-side validation for image uploads.
//!
//! The store accepts any payload; size and type limits are enforced here,
//! before a record is created or patched. Accepted images are inlined as
//! `data:` URLs.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fs;
use std::path::Path;

use crate::error::{BlogError, Result, ValidationError};

pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png"];

pub fn guess_mime(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// Checks an upload's size, then its type.
pub fn validate_image(mime: &str, size: u64, max_bytes: u64) -> std::result::Result<(), ValidationError> {
    if size > max_bytes {
        return Err(ValidationError::ImageTooLarge {
            size,
            max: max_bytes,
        });
    }
    if !ALLOWED_IMAGE_TYPES.contains(&mime) {
        return Err(ValidationError::UnsupportedImageType(mime.to_string()));
    }
    Ok(())
}

/// Encodes raw image bytes as a `data:` URL.
pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Reads, validates and inlines the image at `path`.
pub fn load_image(path: &Path, max_bytes: u64) -> Result<String> {
    let mime = guess_mime(path);
    let size = fs::metadata(path).map_err(BlogError::Io)?.len();
    validate_image(&mime, size, max_bytes)?;

    let bytes = fs::read(path).map_err(BlogError::Io)?;
    tracing::debug!(path = %path.display(), %mime, size, "inlined image");
    Ok(to_data_url(&mime, &bytes))
}
