//! `data:<mime>;base64,<payload>` strings.

use std::fmt;
use std::str::FromStr;

use base64::Engine;

use crate::error::StudioError;

/// A base64 data URI split into its MIME type and payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    /// MIME type, e.g. `"image/png"`.
    pub mime_type: String,
    /// Base64 payload, exactly as it appears in the URI.
    pub data: String,
}

impl DataUri {
    /// Build a data URI from an already encoded payload.
    #[must_use]
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self { mime_type: mime_type.into(), data: data.into() }
    }

    /// Decode the payload to raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not valid base64.
    pub fn decode(&self) -> Result<Vec<u8>, StudioError> {
        base64::engine::general_purpose::STANDARD
            .decode(self.data.trim())
            .map_err(|e| StudioError::InvalidDataUri(format!("bad base64 payload: {e}")))
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{};base64,{}", self.mime_type, self.data)
    }
}

impl FromStr for DataUri {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix("data:")
            .ok_or_else(|| StudioError::InvalidDataUri("missing 'data:' scheme".into()))?;
        let (header, data) = rest
            .split_once(',')
            .ok_or_else(|| StudioError::InvalidDataUri("missing ',' separator".into()))?;
        let mime_type = header
            .strip_suffix(";base64")
            .ok_or_else(|| StudioError::InvalidDataUri("only base64 data URIs are supported".into()))?;
        Ok(Self::new(mime_type, data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_exactly() {
        assert_eq!(DataUri::new("image/png", "AAAA").to_string(), "data:image/png;base64,AAAA");
    }

    #[test]
    fn parses_mime_and_payload() {
        let uri: DataUri = "data:image/jpeg;base64,/9j/4AAQ".parse().unwrap();
        assert_eq!(uri.mime_type, "image/jpeg");
        assert_eq!(uri.data, "/9j/4AAQ");
    }

    #[test]
    fn rejects_non_data_uris() {
        assert!("https://example.com/a.png".parse::<DataUri>().is_err());
        assert!("data:image/png,rawtext".parse::<DataUri>().is_err());
        assert!("data:image/png;base64".parse::<DataUri>().is_err());
    }

    #[test]
    fn decode_payload() {
        let uri = DataUri::new("application/octet-stream", "AQID");
        assert_eq!(uri.decode().unwrap(), vec![1, 2, 3]);
        assert!(DataUri::new("image/png", "!!!").decode().is_err());
    }
}
