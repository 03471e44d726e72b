//! Service context that wires ports to live, recording, or replaying adapters.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::adapters::live::gemini::GeminiContentGenerator;
use crate::adapters::recording::content_generator::RecordingContentGenerator;
use crate::adapters::replaying::content_generator::ReplayingContentGenerator;
use crate::cassette::config::load_cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::config::Config;
use crate::error::StudioError;
use crate::generation::GenerationClient;
use crate::ports::credentials::StaticCredentials;

/// Environment variable naming a cassette to replay instead of calling the API.
pub const REPLAY_ENV: &str = "PRODUCT_STUDIO_REPLAY";

/// Environment variable that turns on cassette recording (`1` or `true`).
pub const RECORD_ENV: &str = "PRODUCT_STUDIO_REC";

/// How the service context should talk to the outside world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Real API calls.
    Live,
    /// Real API calls, captured to a cassette.
    Recording,
    /// Responses served from the given cassette.
    Replaying(PathBuf),
}

impl Mode {
    /// Pick the mode from `PRODUCT_STUDIO_REPLAY` / `PRODUCT_STUDIO_REC`.
    #[must_use]
    pub fn from_env() -> Self {
        if let Ok(path) = std::env::var(REPLAY_ENV) {
            Self::Replaying(PathBuf::from(path))
        } else if std::env::var(RECORD_ENV).is_ok_and(|v| v == "true" || v == "1") {
            Self::Recording
        } else {
            Self::Live
        }
    }
}

/// Bundles the generation client built for the selected mode.
pub struct ServiceContext {
    /// The client every generation goes through.
    pub client: GenerationClient,
}

/// Handle to a recording session that must be finished after use.
pub struct RecordingSession {
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingSession {
    /// Finish the recording and write cassette files to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be written.
    pub fn finish(self) -> Result<PathBuf, StudioError> {
        let recorder = Arc::try_unwrap(self.recorder)
            .map_err(|_| StudioError::Cassette("Recording adapter still has references".into()))?
            .into_inner()
            .map_err(|e| StudioError::Cassette(format!("Recorder lock poisoned: {e}")))?;
        recorder.finish().map_err(|e| StudioError::Cassette(format!("Failed to write cassette: {e}")))
    }
}

impl ServiceContext {
    /// Build the context for `mode`. Recording also returns the session handle.
    ///
    /// # Errors
    ///
    /// Returns an error if a replay cassette cannot be loaded.
    pub fn for_mode(
        mode: &Mode,
        config: &Config,
    ) -> Result<(Self, Option<RecordingSession>), StudioError> {
        match mode {
            Mode::Live => Ok((Self::live(config), None)),
            Mode::Recording => {
                let (ctx, session) = Self::recording(config);
                Ok((ctx, Some(session)))
            }
            Mode::Replaying(path) => Ok((Self::replaying(path)?, None)),
        }
    }

    /// Create a live context. The API key is looked up per request.
    #[must_use]
    pub fn live(config: &Config) -> Self {
        let client = GenerationClient::new(
            Box::new(GeminiContentGenerator::new()),
            Box::new(config.credentials()),
        );
        Self { client }
    }

    /// Create a recording context that wraps the live adapter with a recorder.
    #[must_use]
    pub fn recording(config: &Config) -> (Self, RecordingSession) {
        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let path = PathBuf::from(".product-studio/cassettes")
            .join(&timestamp)
            .join("content_generator.cassette.yaml");

        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
            path,
            format!("{timestamp}-content_generator"),
            get_commit_hash(),
        )));

        let generator = RecordingContentGenerator::new(
            Box::new(GeminiContentGenerator::new()),
            Arc::clone(&recorder),
        );
        let client = GenerationClient::new(Box::new(generator), Box::new(config.credentials()));

        (Self { client }, RecordingSession { recorder })
    }

    /// Create a replaying context from a cassette file.
    ///
    /// Replays need no real key, so a placeholder is supplied.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be loaded.
    pub fn replaying(path: &Path) -> Result<Self, StudioError> {
        let replayer = load_cassette(path).map_err(StudioError::Cassette)?;
        let generator = ReplayingContentGenerator::new(Arc::new(Mutex::new(replayer)));
        let client =
            GenerationClient::new(Box::new(generator), Box::new(StaticCredentials::new("replay")));
        Ok(Self { client })
    }
}

/// Get the current git commit hash, or "unknown" if unavailable.
fn get_commit_hash() -> String {
    std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map_or_else(|| "unknown".to_string(), |s| s.trim().to_string())
}
