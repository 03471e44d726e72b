//! Single-flight generation session.
//!
//! At most one generation runs per session. The state moves
//! `Idle -> InFlight -> Succeeded | Failed`, and a finished session can start
//! again.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::StudioError;
use crate::generation::{GenerationClient, GenerationResult};
use crate::ratio::AspectRatio;
use crate::source_image::SourceImage;

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing has been attempted yet.
    Idle,
    /// A request is outstanding.
    InFlight,
    /// The last attempt produced an image.
    Succeeded {
        /// The image as a data URI.
        image: String,
        /// Text returned alongside the image, if any.
        text: Option<String>,
    },
    /// The last attempt failed.
    Failed {
        /// User-facing reason.
        message: String,
    },
}

/// Owns the state cell that enforces one generation at a time.
#[derive(Debug)]
pub struct GenerationSession {
    state: Mutex<SessionState>,
}

impl Default for GenerationSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationSession {
    /// A fresh, idle session.
    #[must_use]
    pub fn new() -> Self {
        Self { state: Mutex::new(SessionState::Idle) }
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.lock().clone()
    }

    /// Run one generation through `client`.
    ///
    /// A reply without an image counts as a failure.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::Busy`] if another attempt is in flight (the
    /// state is left untouched), [`StudioError::NoImage`] if the model
    /// returned no image, or whatever the client returned.
    pub async fn run(
        &self,
        client: &GenerationClient,
        image: &SourceImage,
        prompt: &str,
        aspect_ratio: AspectRatio,
    ) -> Result<GenerationResult, StudioError> {
        self.begin()?;
        let outcome = client.generate(image, prompt, aspect_ratio).await.and_then(|result| {
            if result.image.is_some() {
                Ok(result)
            } else {
                if let Some(ref text) = result.text {
                    tracing::warn!(%text, "model replied without an image");
                }
                Err(StudioError::NoImage)
            }
        });
        self.finish(&outcome);
        outcome
    }

    fn begin(&self) -> Result<(), StudioError> {
        let mut state = self.lock();
        if *state == SessionState::InFlight {
            return Err(StudioError::Busy);
        }
        *state = SessionState::InFlight;
        Ok(())
    }

    fn finish(&self, outcome: &Result<GenerationResult, StudioError>) {
        let next = match outcome {
            Ok(GenerationResult { image: Some(image), text }) => {
                SessionState::Succeeded { image: image.clone(), text: text.clone() }
            }
            Ok(GenerationResult { image: None, .. }) => {
                SessionState::Failed { message: StudioError::NoImage.to_string() }
            }
            Err(e) => SessionState::Failed { message: e.to_string() },
        };
        *self.lock() = next;
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;
    use tokio::sync::Notify;

    use super::*;
    use crate::ports::content_generator::{ContentCall, ContentGenerator, GenerateFuture};
    use crate::ports::credentials::StaticCredentials;
    use crate::ports::GenerateContentResponse;

    struct Canned(serde_json::Value);

    impl ContentGenerator for Canned {
        fn generate_content(&self, _call: &ContentCall) -> GenerateFuture<'_> {
            let parsed = serde_json::from_value(self.0.clone())
                .map_err(|e| StudioError::MalformedResponse(e.to_string()));
            Box::pin(async move { parsed })
        }
    }

    /// Blocks until released, so a test can observe the in-flight state.
    struct Gate {
        entered: Arc<Notify>,
        release: Arc<Notify>,
    }

    impl ContentGenerator for Gate {
        fn generate_content(&self, _call: &ContentCall) -> GenerateFuture<'_> {
            Box::pin(async move {
                self.entered.notify_one();
                self.release.notified().await;
                Ok(GenerateContentResponse::default())
            })
        }
    }

    fn client(generator: impl ContentGenerator + 'static) -> GenerationClient {
        GenerationClient::new(Box::new(generator), Box::new(StaticCredentials::new("k")))
    }

    fn photo() -> SourceImage {
        SourceImage::new(vec![1, 2, 3], "image/png")
    }

    #[tokio::test]
    async fn success_moves_to_succeeded() {
        let session = GenerationSession::new();
        assert_eq!(session.state(), SessionState::Idle);

        let client = client(Canned(json!({
            "candidates": [{"content": {"parts": [
                {"text": "Here you go"},
                {"inlineData": {"mimeType": "image/png", "data": "AAAA"}}
            ]}}]
        })));
        let result = session.run(&client, &photo(), "p", AspectRatio::Square).await.unwrap();

        assert_eq!(result.image.as_deref(), Some("data:image/png;base64,AAAA"));
        assert_eq!(
            session.state(),
            SessionState::Succeeded {
                image: "data:image/png;base64,AAAA".into(),
                text: Some("Here you go".into()),
            }
        );
    }

    #[tokio::test]
    async fn missing_image_moves_to_failed() {
        let session = GenerationSession::new();
        let client = client(Canned(json!({
            "candidates": [{"content": {"parts": [{"text": "no"}]}}]
        })));
        let err = session.run(&client, &photo(), "p", AspectRatio::Square).await.unwrap_err();

        assert!(matches!(err, StudioError::NoImage));
        assert_eq!(
            session.state(),
            SessionState::Failed {
                message: "The model did not return an image. Try a different prompt.".into()
            }
        );
    }

    #[tokio::test]
    async fn configuration_error_moves_to_failed() {
        let session = GenerationSession::new();
        let client = GenerationClient::new(
            Box::new(Canned(json!({}))),
            Box::new(StaticCredentials::missing()),
        );
        let err = session.run(&client, &photo(), "p", AspectRatio::Square).await.unwrap_err();

        assert!(err.is_configuration());
        assert!(matches!(session.state(), SessionState::Failed { message } if message.contains("API key")));
    }

    #[tokio::test]
    async fn second_run_while_in_flight_is_busy() {
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let session = Arc::new(GenerationSession::new());
        let client = Arc::new(client(Gate {
            entered: Arc::clone(&entered),
            release: Arc::clone(&release),
        }));

        let first = {
            let session = Arc::clone(&session);
            let client = Arc::clone(&client);
            tokio::spawn(async move {
                session.run(&client, &photo(), "p", AspectRatio::Square).await
            })
        };

        entered.notified().await;
        assert_eq!(session.state(), SessionState::InFlight);

        let err = session.run(&client, &photo(), "p", AspectRatio::Square).await.unwrap_err();
        assert!(matches!(err, StudioError::Busy));
        assert_eq!(session.state(), SessionState::InFlight);

        release.notify_one();
        let first = first.await.unwrap();
        assert!(matches!(first, Err(StudioError::NoImage)));
        assert!(matches!(session.state(), SessionState::Failed { .. }));
    }

    #[tokio::test]
    async fn finished_session_can_run_again() {
        let session = GenerationSession::new();
        let failing = client(Canned(json!({"candidates": []})));
        let _ = session.run(&failing, &photo(), "p", AspectRatio::Square).await;
        assert!(matches!(session.state(), SessionState::Failed { .. }));

        let working = client(Canned(json!({
            "candidates": [{"content": {"parts": [
                {"inlineData": {"mimeType": "image/png", "data": "AAAA"}}
            ]}}]
        })));
        session.run(&working, &photo(), "p", AspectRatio::Square).await.unwrap();
        assert!(matches!(session.state(), SessionState::Succeeded { .. }));
    }
}
