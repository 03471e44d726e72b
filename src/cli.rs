//! CLI argument parsing with clap.

use std::path::PathBuf;

use clap::Parser;

use crate::error::StudioError;
use crate::presets::find_preset;

/// Restage a product photo in a new scene with Gemini.
#[derive(Parser, Debug)]
#[command(name = "product-studio", version, about)]
pub struct Cli {
    /// Scene description for the product photo.
    #[arg(conflicts_with_all = ["prompt_file", "preset"])]
    pub prompt: Option<String>,

    /// Path to a file containing the scene description.
    #[arg(short = 'p', long, conflicts_with = "preset")]
    pub prompt_file: Option<PathBuf>,

    /// Use a built-in scene (see --list-presets).
    #[arg(long)]
    pub preset: Option<String>,

    /// Product photo to restage.
    #[arg(short, long, required_unless_present = "list_presets")]
    pub image: Option<PathBuf>,

    /// Aspect ratio: 1:1, 16:9, 9:16 or custom.
    #[arg(short, long)]
    pub aspect_ratio: Option<String>,

    /// Output width in pixels (with --aspect-ratio custom).
    #[arg(long, allow_negative_numbers = true)]
    pub width: Option<i64>,

    /// Output height in pixels (with --aspect-ratio custom).
    #[arg(long, allow_negative_numbers = true)]
    pub height: Option<i64>,

    /// Output file path (auto-generated if not specified).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the built-in scenes and exit.
    #[arg(long)]
    pub list_presets: bool,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Resolve the prompt from the positional argument, a file, or a preset.
    ///
    /// # Errors
    ///
    /// Returns an error if no prompt source is given, the file cannot be read,
    /// the preset is unknown, or the resulting prompt is blank.
    pub fn resolve_prompt(&self) -> Result<String, StudioError> {
        let prompt = if let Some(ref text) = self.prompt {
            text.clone()
        } else if let Some(ref path) = self.prompt_file {
            std::fs::read_to_string(path)?
        } else if let Some(ref name) = self.preset {
            find_preset(name).map(|p| p.text.to_string()).ok_or_else(|| {
                StudioError::InvalidArgument(format!(
                    "Unknown preset '{name}'. Use --list-presets to see them"
                ))
            })?
        } else {
            return Err(StudioError::InvalidArgument(
                "Provide a prompt string, -p/--prompt-file or --preset".into(),
            ));
        };

        let prompt = prompt.trim().to_string();
        if prompt.is_empty() {
            return Err(StudioError::InvalidArgument("Prompt must not be empty".into()));
        }
        Ok(prompt)
    }
}
