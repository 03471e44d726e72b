//! Single-request generation client: photo + prompt in, image and/or text out.

use crate::data_uri::DataUri;
use crate::error::StudioError;
use crate::ports::content_generator::{
    Content, GenerateContentRequest, GenerationConfig, ImageConfig, Part,
};
use crate::ports::{ContentCall, ContentGenerator, CredentialProvider, GenerateContentResponse};
use crate::ratio::AspectRatio;
use crate::source_image::SourceImage;

/// Image model every request is sent to.
pub const MODEL_NAME: &str = "gemini-2.5-flash-image";

/// What a generation produced. Either field may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationResult {
    /// The generated image as a `data:` URI.
    pub image: Option<String>,
    /// Any text the model returned alongside (or instead of) the image.
    pub text: Option<String>,
}

/// Performs one generation round trip per call.
pub struct GenerationClient {
    generator: Box<dyn ContentGenerator>,
    credentials: Box<dyn CredentialProvider>,
}

impl GenerationClient {
    /// Create a client over a generator port and a credential source.
    #[must_use]
    pub fn new(
        generator: Box<dyn ContentGenerator>,
        credentials: Box<dyn CredentialProvider>,
    ) -> Self {
        Self { generator, credentials }
    }

    /// Send `image` and `prompt` to the model and decode its reply.
    ///
    /// A reply without an image part is not an error here; the returned
    /// result simply has no `image`.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::MissingApiKey`] before any request when no key
    /// is available, [`StudioError::InvalidArgument`] for an empty prompt or
    /// image, and passes transport failures through unchanged.
    pub async fn generate(
        &self,
        image: &SourceImage,
        prompt: &str,
        aspect_ratio: AspectRatio,
    ) -> Result<GenerationResult, StudioError> {
        let api_key = self.credentials.api_key().ok_or_else(|| StudioError::MissingApiKey {
            env_var: self.credentials.env_var().to_string(),
        })?;

        if prompt.trim().is_empty() {
            return Err(StudioError::InvalidArgument("Prompt must not be empty".into()));
        }
        if image.data.is_empty() {
            return Err(StudioError::InvalidArgument("Source image must not be empty".into()));
        }

        let call = ContentCall {
            model: MODEL_NAME.to_string(),
            api_key,
            request: build_request(image, prompt, aspect_ratio),
        };

        tracing::info!(model = MODEL_NAME, %aspect_ratio, "requesting generation");
        let response = self.generator.generate_content(&call).await.inspect_err(|e| {
            tracing::error!(error = %e, "generation request failed");
        })?;

        let result = decode_response(response);
        tracing::info!(
            image = result.image.is_some(),
            text = result.text.is_some(),
            "generation finished"
        );
        Ok(result)
    }
}

/// Assemble the request body: image part first, then the prompt.
fn build_request(
    image: &SourceImage,
    prompt: &str,
    aspect_ratio: AspectRatio,
) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: None,
            parts: vec![Part::inline(&image.mime_type, image.to_base64()), Part::text(prompt)],
        }],
        generation_config: GenerationConfig { image_config: ImageConfig { aspect_ratio } },
    }
}

/// Pull the image and text out of the first candidate.
///
/// Later parts overwrite earlier ones of the same kind.
fn decode_response(response: GenerateContentResponse) -> GenerationResult {
    let mut result = GenerationResult::default();

    let Some(content) = response.candidates.into_iter().next().and_then(|c| c.content) else {
        return result;
    };

    for part in content.parts {
        if let Some(inline) = part.inline_data {
            result.image = Some(DataUri::new(inline.mime_type, inline.data).to_string());
        } else if let Some(text) = part.text.filter(|t| !t.is_empty()) {
            result.text = Some(text);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use serde_json::json;

    use super::*;
    use crate::ports::content_generator::{Candidate, GenerateFuture};
    use crate::ports::credentials::StaticCredentials;

    /// Returns a canned reply and remembers every call it receives.
    struct FakeGenerator {
        reply: Result<GenerateContentResponse, u16>,
        calls: Arc<Mutex<Vec<ContentCall>>>,
    }

    impl ContentGenerator for FakeGenerator {
        fn generate_content(&self, call: &ContentCall) -> GenerateFuture<'_> {
            self.calls.lock().unwrap().push(call.clone());
            let reply = self.reply.clone().map_err(|status| StudioError::Api {
                status,
                message: "upstream unavailable".into(),
            });
            Box::pin(async move { reply })
        }
    }

    fn client_with(
        reply: Result<GenerateContentResponse, u16>,
        key: Option<&str>,
    ) -> (GenerationClient, Arc<Mutex<Vec<ContentCall>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let generator = FakeGenerator { reply, calls: Arc::clone(&calls) };
        let credentials = StaticCredentials(key.map(str::to_string));
        (GenerationClient::new(Box::new(generator), Box::new(credentials)), calls)
    }

    fn response(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    fn photo() -> SourceImage {
        SourceImage::new(vec![0xFF, 0xD8, 0xFF, 0xE0], "image/jpeg")
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_call() {
        let (client, calls) = client_with(Ok(GenerateContentResponse::default()), None);
        let err = client.generate(&photo(), "a podium", AspectRatio::Square).await.unwrap_err();
        assert!(matches!(err, StudioError::MissingApiKey { .. }));
        assert!(err.is_configuration());
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn sends_image_then_prompt_with_ratio() {
        let (client, calls) = client_with(Ok(GenerateContentResponse::default()), Some("k"));
        client.generate(&photo(), "on marble", AspectRatio::Landscape16x9).await.unwrap();

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].model, MODEL_NAME);
        assert_eq!(calls[0].api_key, "k");
        assert_eq!(
            serde_json::to_value(&calls[0].request).unwrap(),
            json!({
                "contents": [{
                    "parts": [
                        {"inlineData": {"mimeType": "image/jpeg", "data": "/9j/4A=="}},
                        {"text": "on marble"}
                    ]
                }],
                "generationConfig": {"imageConfig": {"aspectRatio": "16:9"}}
            })
        );
    }

    #[tokio::test]
    async fn inline_part_becomes_data_uri() {
        let reply = response(json!({
            "candidates": [{"content": {"parts": [
                {"inlineData": {"mimeType": "image/png", "data": "AAAA"}}
            ]}}]
        }));
        let (client, _) = client_with(Ok(reply), Some("k"));
        let result = client.generate(&photo(), "p", AspectRatio::Square).await.unwrap();
        assert_eq!(result.image.as_deref(), Some("data:image/png;base64,AAAA"));
        assert!(result.text.is_none());
    }

    #[tokio::test]
    async fn text_only_reply_has_no_image() {
        let reply = response(json!({
            "candidates": [{"content": {"parts": [{"text": "I can't edit that photo."}]}}]
        }));
        let (client, _) = client_with(Ok(reply), Some("k"));
        let result = client.generate(&photo(), "p", AspectRatio::Square).await.unwrap();
        assert!(result.image.is_none());
        assert_eq!(result.text.as_deref(), Some("I can't edit that photo."));
    }

    #[tokio::test]
    async fn zero_candidates_is_empty_result() {
        let (client, _) = client_with(Ok(response(json!({"candidates": []}))), Some("k"));
        let result = client.generate(&photo(), "p", AspectRatio::Square).await.unwrap();
        assert_eq!(result, GenerationResult::default());
    }

    #[tokio::test]
    async fn transport_errors_propagate_after_one_call() {
        let (client, calls) = client_with(Err(503), Some("k"));
        let err = client.generate(&photo(), "p", AspectRatio::Square).await.unwrap_err();
        assert!(err.is_transport());
        assert!(err.to_string().contains("upstream unavailable"));
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn empty_prompt_is_rejected_without_a_call() {
        let (client, calls) = client_with(Ok(GenerateContentResponse::default()), Some("k"));
        let err = client.generate(&photo(), "   ", AspectRatio::Square).await.unwrap_err();
        assert!(matches!(err, StudioError::InvalidArgument(_)));
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_image_is_rejected_without_a_call() {
        let (client, calls) = client_with(Ok(GenerateContentResponse::default()), Some("k"));
        let empty = SourceImage::new(vec![], "image/png");
        let err = client.generate(&empty, "on marble", AspectRatio::Square).await.unwrap_err();
        assert!(matches!(err, StudioError::InvalidArgument(_)));
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn mime_and_payload_pass_through_untouched() {
        let payload = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk";
        let result = decode_response(response(json!({
            "candidates": [{"content": {"parts": [
                {"inlineData": {"mimeType": "image/webp", "data": payload}}
            ]}}]
        })));
        let uri: DataUri = result.image.unwrap().parse().unwrap();
        assert_eq!(uri.mime_type, "image/webp");
        assert_eq!(uri.data, payload);
    }

    #[test]
    fn last_part_of_each_kind_wins() {
        let result = decode_response(response(json!({
            "candidates": [{"content": {"parts": [
                {"text": "first"},
                {"inlineData": {"mimeType": "image/png", "data": "AAAA"}},
                {"text": "second"},
                {"inlineData": {"mimeType": "image/jpeg", "data": "BBBB"}}
            ]}}]
        })));
        assert_eq!(result.image.as_deref(), Some("data:image/jpeg;base64,BBBB"));
        assert_eq!(result.text.as_deref(), Some("second"));
    }

    #[test]
    fn only_first_candidate_is_read() {
        let result = decode_response(GenerateContentResponse {
            candidates: vec![
                Candidate { content: None, finish_reason: Some("SAFETY".into()) },
                Candidate {
                    content: Some(Content {
                        role: Some("model".into()),
                        parts: vec![Part::inline("image/png", "AAAA")],
                    }),
                    finish_reason: None,
                },
            ],
        });
        assert_eq!(result, GenerationResult::default());
    }
}
