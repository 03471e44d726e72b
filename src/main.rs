//! Product Studio - restage product photos with Gemini image models.

mod adapters;
mod cassette;
mod cli;
mod config;
mod context;
mod data_uri;
mod error;
mod generation;
mod output;
mod ports;
mod presets;
mod ratio;
mod session;
mod source_image;

use std::process;

use clap::Parser;
use tracing::Level;

use crate::cli::Cli;
use crate::config::Config;
use crate::context::{Mode, ServiceContext};
use crate::data_uri::DataUri;
use crate::error::StudioError;
use crate::output::{resolve_output_path, save_data_uri};
use crate::presets::catalog_listing;
use crate::ratio::{resolve, AspectRatioSelection};
use crate::session::{GenerationSession, SessionState};
use crate::source_image::SourceImage;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        process::exit(exit_code(&e));
    }
}

/// 2 for configuration problems, 3 for service failures, 1 otherwise.
fn exit_code(error: &StudioError) -> i32 {
    if error.is_configuration() {
        2
    } else if error.is_transport() {
        3
    } else {
        1
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

async fn run(cli: Cli) -> Result<(), StudioError> {
    if cli.list_presets {
        print!("{}", catalog_listing());
        return Ok(());
    }

    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path).map_err(StudioError::Config)?;
    tracing::debug!(path = %config_path.display(), "configuration loaded");

    let prompt = cli.resolve_prompt()?;

    let choice = cli.aspect_ratio.as_deref().unwrap_or(&config.defaults.aspect_ratio);
    if choice != "custom" && (cli.width.is_some() || cli.height.is_some()) {
        tracing::warn!(choice, "--width/--height are ignored unless --aspect-ratio is custom");
    }
    let selection = AspectRatioSelection::from_choice(
        choice,
        cli.width.or(Some(config.defaults.width)),
        cli.height.or(Some(config.defaults.height)),
    )
    .map_err(StudioError::InvalidArgument)?;
    let aspect_ratio = resolve(selection);
    tracing::debug!(?selection, %aspect_ratio, "aspect ratio resolved");

    let image_arg = cli
        .image
        .as_deref()
        .ok_or_else(|| StudioError::InvalidArgument("--image is required".into()))?;
    let image = match image_arg.to_str().filter(|s| s.starts_with("data:")) {
        Some(uri) => SourceImage::from_data_uri(uri)?,
        None => SourceImage::load(image_arg).await?,
    };

    let mode = Mode::from_env();
    tracing::debug!(?mode, "service mode");
    let (ctx, recording) = ServiceContext::for_mode(&mode, &config)?;

    let session = GenerationSession::new();
    let outcome = session.run(&ctx.client, &image, &prompt, aspect_ratio).await;
    if let SessionState::Failed { ref message } = session.state() {
        tracing::debug!(%message, "generation session failed");
    }
    drop(ctx);

    if let Some(recording) = recording {
        match recording.finish() {
            Ok(path) => eprintln!("Cassette saved: {}", path.display()),
            Err(e) => eprintln!("Warning: failed to save cassette: {e}"),
        }
    }

    let result = outcome?;
    let Some(image_uri) = result.image else {
        return Err(StudioError::NoImage);
    };

    let mime_type = image_uri.parse::<DataUri>()?.mime_type;
    let output_path = resolve_output_path(
        cli.output.as_deref(),
        config.defaults.output_dir.as_deref(),
        &mime_type,
    );
    save_data_uri(&image_uri, &output_path)?;

    if let Some(text) = result.text {
        eprintln!("Model: {text}");
    }
    eprintln!("Saved: {}", output_path.display());
    Ok(())
}
