//! The product photo sent alongside the prompt.

use std::path::Path;

use base64::Engine;

use crate::data_uri::DataUri;
use crate::error::StudioError;

/// Raw image bytes plus the MIME type they are declared as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    /// Raw file bytes.
    pub data: Vec<u8>,
    /// MIME type, e.g. `"image/jpeg"`.
    pub mime_type: String,
}

impl SourceImage {
    /// Wrap bytes that are already in memory.
    #[must_use]
    pub fn new(data: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self { data, mime_type: mime_type.into() }
    }

    /// Read an image file from disk.
    ///
    /// The MIME type comes from the file extension, or from sniffing the
    /// bytes when the extension is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is empty, or is not a
    /// recognizable image.
    pub async fn load(path: &Path) -> Result<Self, StudioError> {
        let data = tokio::fs::read(path).await?;
        if data.is_empty() {
            return Err(StudioError::InvalidArgument(format!(
                "Image file {} is empty",
                path.display()
            )));
        }

        let mime_type = mime_from_extension(path)
            .map(str::to_string)
            .or_else(|| sniff_mime(&data))
            .ok_or_else(|| {
                StudioError::InvalidArgument(format!(
                    "Cannot determine image type of {}",
                    path.display()
                ))
            })?;

        tracing::debug!(path = %path.display(), %mime_type, bytes = data.len(), "loaded source image");
        Ok(Self { data, mime_type })
    }

    /// Decode an image given as a `data:` URI, dropping the scheme prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if `uri` is not a base64 data URI.
    pub fn from_data_uri(uri: &str) -> Result<Self, StudioError> {
        let uri: DataUri = uri.parse()?;
        Ok(Self::new(uri.decode()?, uri.mime_type))
    }

    /// The raw payload as standard base64, without any URI prefix.
    #[must_use]
    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.data)
    }
}

fn mime_from_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "heic" => Some("image/heic"),
        "heif" => Some("image/heif"),
        _ => None,
    }
}

fn sniff_mime(data: &[u8]) -> Option<String> {
    image::guess_format(data).ok().map(|f| f.to_mime_type().to_string())
}
