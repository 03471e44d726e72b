//! Content generator port: one `generateContent` round trip against Gemini.
//!
//! The wire types mirror the service's JSON (camelCase) and are shared by
//! requests and responses, so recorded cassettes hold the raw service shape.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::StudioError;
use crate::ratio::AspectRatio;

/// A single outbound call: target model, credential, and request body.
#[derive(Clone, Serialize, Deserialize)]
pub struct ContentCall {
    /// Model identifier, e.g. `"gemini-2.5-flash-image"`.
    pub model: String,
    /// API key for this call. Never written to cassettes.
    #[serde(skip)]
    pub api_key: String,
    /// The JSON request body.
    pub request: GenerateContentRequest,
}

impl fmt::Debug for ContentCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentCall")
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .field("request", &self.request)
            .finish()
    }
}

/// Body of a `generateContent` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation turns; this crate always sends exactly one.
    pub contents: Vec<Content>,
    /// Output configuration.
    pub generation_config: GenerationConfig,
}

/// Generation options attached to a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Image output options.
    pub image_config: ImageConfig,
}

/// Image output options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageConfig {
    /// Framing of the generated image.
    pub aspect_ratio: AspectRatio,
}

/// Body of a `generateContent` response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// Alternative generations. Only the first is consumed.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// One alternative generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Generated content. Absent when the candidate was blocked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    /// Why generation stopped (`"STOP"`, `"SAFETY"`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// An ordered list of parts making up one turn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    /// `"user"` or `"model"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// The parts, in order.
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// A fragment of content: inline binary data or text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// Text fragment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Inline binary fragment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    /// A text part.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: Some(text.into()), inline_data: None }
    }

    /// An inline data part carrying already base64-encoded bytes.
    #[must_use]
    pub fn inline(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData { mime_type: mime_type.into(), data: data.into() }),
        }
    }
}

/// Binary payload tagged with its MIME type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    /// MIME type, e.g. `"image/png"`.
    pub mime_type: String,
    /// Base64-encoded bytes.
    pub data: String,
}

/// Boxed future type returned by [`ContentGenerator::generate_content`].
pub type GenerateFuture<'a> =
    Pin<Box<dyn Future<Output = Result<GenerateContentResponse, StudioError>> + Send + 'a>>;

/// Sends a content generation request to an external service.
pub trait ContentGenerator: Send + Sync {
    /// Perform exactly one request/response round trip.
    fn generate_content(&self, call: &ContentCall) -> GenerateFuture<'_>;
}
