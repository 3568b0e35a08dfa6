//! Profile-picture processing.
//!
//! Uploaded images are cropped/resized to a fixed square, re-encoded as
//! JPEG and stored inline as a base64 data URL. Decoding and resizing are
//! CPU-bound and run on the blocking pool.
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use bytes::Bytes;
use image::{imageops::FilterType, ImageOutputFormat};
use std::io::Cursor;

use crate::error::{AppError, Result};

/// Upload size cap, enforced before any decoding happens.
pub const MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024;

/// Stored avatar edge length in pixels.
pub const AVATAR_DIMENSION: u32 = 200;

const JPEG_QUALITY: u8 = 85;

/// Process an uploaded image into the stored data-URL form (blocking).
pub fn process_avatar(data: &[u8]) -> Result<String> {
    if data.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::BadRequest(format!(
            "file exceeds the {} byte limit",
            MAX_UPLOAD_BYTES
        )));
    }

    let img = image::load_from_memory(data)
        .map_err(|_| AppError::BadRequest("unsupported or corrupt image".to_string()))?;

    // Cover-fit: scale to fill the square, cropping overflow.
    let square = img.resize_to_fill(AVATAR_DIMENSION, AVATAR_DIMENSION, FilterType::Lanczos3);

    let mut buf = Vec::new();
    square
        .write_to(&mut Cursor::new(&mut buf), ImageOutputFormat::Jpeg(JPEG_QUALITY))
        .map_err(|e| AppError::Internal(format!("image encoding failed: {e}")))?;

    Ok(format!("data:image/jpeg;base64,{}", BASE64.encode(&buf)))
}

/// Async wrapper running [`process_avatar`] on the blocking pool.
pub async fn process_avatar_async(data: Bytes) -> Result<String> {
    tokio::task::spawn_blocking(move || process_avatar(&data))
        .await
        .map_err(|e| AppError::Internal(format!("image task panicked: {e}")))?
}
