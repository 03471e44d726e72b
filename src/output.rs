//! Saving generated images: file naming, data URI decoding, format conversion.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::data_uri::DataUri;
use crate::error::StudioError;

/// Prefix of auto-generated output file names.
const FILE_PREFIX: &str = "pro-product-edit";

/// Generate an output filename: `pro-product-edit-<unix-ts>.<ext>`.
#[must_use]
pub fn auto_filename(mime_type: &str) -> String {
    let timestamp = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs();
    format!("{FILE_PREFIX}-{timestamp}.{}", extension_for_mime(mime_type))
}

/// Sanitize a string into lowercase kebab-case.
///
/// Replaces runs of non-alphanumeric chars with one hyphen, trims hyphens at
/// both ends, and caps the length.
#[must_use]
pub fn sanitize_for_filename(input: &str, max_len: usize) -> String {
    let mut result = String::with_capacity(max_len);
    let mut last_was_hyphen = true; // Prevents leading hyphen

    for ch in input.chars() {
        if result.len() >= max_len {
            break;
        }
        if ch.is_ascii_alphanumeric() {
            result.push(ch.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            result.push('-');
            last_was_hyphen = true;
        }
    }

    while result.ends_with('-') {
        result.pop();
    }
    result
}

/// File extension for a MIME type. Unknown types get `png`.
#[must_use]
pub fn extension_for_mime(mime_type: &str) -> &'static str {
    match mime_type {
        "image/jpeg" => "jpg",
        "image/webp" => "webp",
        _ => "png",
    }
}

/// Resolve the output path: explicit path, or an auto name inside `dir`.
#[must_use]
pub fn resolve_output_path(explicit: Option<&Path>, dir: Option<&Path>, mime_type: &str) -> PathBuf {
    match (explicit, dir) {
        (Some(p), _) => p.to_path_buf(),
        (None, Some(d)) => d.join(auto_filename(mime_type)),
        (None, None) => PathBuf::from(auto_filename(mime_type)),
    }
}

/// Write a generated image, given as a data URI, to `output_path`.
///
/// The bytes are written as-is when the path's extension matches the MIME
/// type (or is absent), and re-encoded otherwise.
///
/// # Errors
///
/// Returns an error if the URI is malformed, the file cannot be written, or
/// conversion fails.
pub fn save_data_uri(uri: &str, output_path: &Path) -> Result<(), StudioError> {
    let uri: DataUri = uri.parse()?;
    let data = uri.decode()?;

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    match target_format(output_path) {
        Some(format) if !mime_matches_format(&uri.mime_type, format) => {
            convert_and_save(&data, format, output_path)
        }
        _ => std::fs::write(output_path, data).map_err(StudioError::Io),
    }
}

fn target_format(path: &Path) -> Option<image::ImageFormat> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some(image::ImageFormat::Jpeg),
        "png" => Some(image::ImageFormat::Png),
        "webp" => Some(image::ImageFormat::WebP),
        _ => None,
    }
}

fn mime_matches_format(mime: &str, format: image::ImageFormat) -> bool {
    mime == format.to_mime_type()
}

fn convert_and_save(
    data: &[u8],
    format: image::ImageFormat,
    output_path: &Path,
) -> Result<(), StudioError> {
    let img = image::load_from_memory(data)
        .map_err(|e| StudioError::ImageConversion(format!("Failed to decode image: {e}")))?;

    // JPEG has no alpha channel.
    let img = if format == image::ImageFormat::Jpeg {
        image::DynamicImage::ImageRgb8(img.to_rgb8())
    } else {
        img
    };

    img.save_with_format(output_path, format).map_err(|e| {
        StudioError::ImageConversion(format!("Failed to save as {format:?}: {e}"))
    })
}
