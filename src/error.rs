//! Unified error type for product-studio.

use thiserror::Error;

/// Errors that can occur while preparing, running, or saving a generation.
#[derive(Debug, Error)]
pub enum StudioError {
    /// No API key was available when a generation was requested.
    #[error("API key is missing. Set {env_var} or add it to the config file.")]
    MissingApiKey {
        /// The primary environment variable consulted.
        env_var: String,
    },

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// The service answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body or error message from the service.
        message: String,
    },

    /// A network error occurred.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The service answered with a body that could not be decoded.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A service failure read back from a cassette, shown as recorded.
    #[error("{0}")]
    Replayed(String),

    /// The request succeeded but no image part was returned.
    #[error("The model did not return an image. Try a different prompt.")]
    NoImage,

    /// A generation is already in flight for this session.
    #[error("A generation is already in progress")]
    Busy,

    /// Invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A string that should have been a base64 data URI was not one.
    #[error("Invalid data URI: {0}")]
    InvalidDataUri(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image format conversion error.
    #[error("Image conversion error: {0}")]
    ImageConversion(String),

    /// Cassette could not be loaded, replayed, or written.
    #[error("Cassette error: {0}")]
    Cassette(String),
}

impl StudioError {
    /// Whether the failure happened before any request could be made
    /// because of missing or broken configuration.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::MissingApiKey { .. } | Self::Config(_))
    }

    /// Whether the failure came from talking to the generation service.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Api { .. } | Self::Network(_) | Self::MalformedResponse(_) | Self::Replayed(_)
        )
    }
}
