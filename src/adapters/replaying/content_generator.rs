//! Replaying adapter for the `ContentGenerator` port.

use std::sync::{Arc, Mutex};

use super::{next_output, replay_result, Replayed};
use crate::cassette::replayer::CassetteReplayer;
use crate::error::StudioError;
use crate::ports::content_generator::{
    ContentCall, ContentGenerator, GenerateContentResponse, GenerateFuture,
};

/// Serves recorded service responses from a cassette.
pub struct ReplayingContentGenerator {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingContentGenerator {
    /// Create a replaying generator backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl ContentGenerator for ReplayingContentGenerator {
    fn generate_content(&self, _call: &ContentCall) -> GenerateFuture<'_> {
        let output = next_output(&self.replayer, "content_generator", "generate_content");
        Box::pin(async move {
            let output = output.map_err(StudioError::Cassette)?;
            match replay_result::<GenerateContentResponse>(output) {
                Ok(Replayed::Ok(response)) => Ok(response),
                Ok(Replayed::Err(message)) => Err(StudioError::Replayed(message)),
                Err(e) => Err(StudioError::Cassette(format!("Bad recorded response: {e}"))),
            }
        })
    }
}
