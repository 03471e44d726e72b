//! Live adapter for the Gemini `generateContent` API.

use reqwest::Client;

use crate::error::StudioError;
use crate::ports::content_generator::{
    ContentCall, ContentGenerator, GenerateContentResponse, GenerateFuture,
};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Longest slice of an unparseable body kept in error messages.
const BODY_PREVIEW_LEN: usize = 500;

/// Live generator that calls the Google AI API over HTTPS.
pub struct GeminiContentGenerator {
    client: Client,
    base_url: String,
}

impl GeminiContentGenerator {
    /// Create a generator against the public Gemini endpoint.
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(GEMINI_API_BASE)
    }

    /// Create a generator against a different models endpoint.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { client: Client::new(), base_url: base_url.into() }
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/{model}:generateContent", self.base_url.trim_end_matches('/'))
    }
}

impl Default for GeminiContentGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentGenerator for GeminiContentGenerator {
    fn generate_content(&self, call: &ContentCall) -> GenerateFuture<'_> {
        let call = call.clone();
        Box::pin(async move {
            let url = self.endpoint(&call.model);
            tracing::debug!(%url, "sending generateContent request");

            let response = self
                .client
                .post(&url)
                .header("x-goog-api-key", &call.api_key)
                .json(&call.request)
                .send()
                .await?;

            let status = response.status();
            let body = response.text().await?;
            tracing::debug!(status = status.as_u16(), bytes = body.len(), "response received");

            if !status.is_success() {
                return Err(StudioError::Api { status: status.as_u16(), message: body });
            }

            serde_json::from_str::<GenerateContentResponse>(&body).map_err(|e| {
                StudioError::MalformedResponse(format!("{e}. Body: {}", preview(&body)))
            })
        })
    }
}

fn preview(body: &str) -> String {
    if body.len() <= BODY_PREVIEW_LEN {
        return body.to_string();
    }
    let mut end = BODY_PREVIEW_LEN;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
