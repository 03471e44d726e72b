//! Recording adapter for the `ContentGenerator` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::content_generator::{ContentCall, ContentGenerator, GenerateFuture};

/// Records content generation calls while delegating to an inner implementation.
pub struct RecordingContentGenerator {
    inner: Box<dyn ContentGenerator>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingContentGenerator {
    /// Creates a new recording generator wrapping the given implementation.
    pub fn new(inner: Box<dyn ContentGenerator>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl ContentGenerator for RecordingContentGenerator {
    fn generate_content(&self, call: &ContentCall) -> GenerateFuture<'_> {
        let call = call.clone();
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = self.inner.generate_content(&call).await;
            record_result(&recorder, "content_generator", "generate_content", &call, &result);
            result
        })
    }
}
