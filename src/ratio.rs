//! Aspect ratio selection and resolution to the tokens Gemini accepts.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An aspect ratio token accepted by the image generation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectRatio {
    /// `1:1`
    #[serde(rename = "1:1")]
    Square,
    /// `3:4`
    #[serde(rename = "3:4")]
    Portrait3x4,
    /// `4:3`
    #[serde(rename = "4:3")]
    Landscape4x3,
    /// `9:16`
    #[serde(rename = "9:16")]
    Portrait9x16,
    /// `16:9`
    #[serde(rename = "16:9")]
    Landscape16x9,
}

impl AspectRatio {
    /// All tokens, in the order used for nearest-match resolution.
    pub const ALL: [Self; 5] = [
        Self::Square,
        Self::Portrait3x4,
        Self::Landscape4x3,
        Self::Portrait9x16,
        Self::Landscape16x9,
    ];

    /// The token string sent to the service.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Square => "1:1",
            Self::Portrait3x4 => "3:4",
            Self::Landscape4x3 => "4:3",
            Self::Portrait9x16 => "9:16",
            Self::Landscape16x9 => "16:9",
        }
    }

    /// Width divided by height, as used for nearest-match resolution.
    #[must_use]
    pub const fn value(self) -> f64 {
        match self {
            Self::Square => 1.0,
            Self::Portrait3x4 => 0.75,
            Self::Landscape4x3 => 1.3333,
            Self::Portrait9x16 => 0.5625,
            Self::Landscape16x9 => 1.7778,
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the user picked: one of the fixed ratios, or custom pixel dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectRatioSelection {
    /// `1:1`
    Square,
    /// `16:9`
    Landscape,
    /// `9:16`
    Portrait,
    /// Arbitrary output dimensions in pixels.
    Custom {
        /// Width in pixels.
        width: i64,
        /// Height in pixels.
        height: i64,
    },
}

impl AspectRatioSelection {
    /// Build a selection from the CLI's ratio choice plus optional dimensions.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown choice, or for `custom` without both
    /// dimensions.
    pub fn from_choice(
        choice: &str,
        width: Option<i64>,
        height: Option<i64>,
    ) -> Result<Self, String> {
        match choice {
            "1:1" => Ok(Self::Square),
            "16:9" => Ok(Self::Landscape),
            "9:16" => Ok(Self::Portrait),
            "custom" => match (width, height) {
                (Some(width), Some(height)) => Ok(Self::Custom { width, height }),
                _ => Err("--aspect-ratio custom requires both --width and --height".to_string()),
            },
            other => Err(format!(
                "Unsupported aspect ratio '{other}'. Valid: 1:1, 16:9, 9:16, custom"
            )),
        }
    }
}

/// Map a selection to the closest supported token.
///
/// Custom dimensions pick the token whose ratio is nearest to
/// `width / height`; equally near candidates resolve to the earlier one in
/// [`AspectRatio::ALL`]. Non-positive dimensions resolve to `1:1`.
#[must_use]
pub fn resolve(selection: AspectRatioSelection) -> AspectRatio {
    match selection {
        AspectRatioSelection::Square => AspectRatio::Square,
        AspectRatioSelection::Landscape => AspectRatio::Landscape16x9,
        AspectRatioSelection::Portrait => AspectRatio::Portrait9x16,
        AspectRatioSelection::Custom { width, height } => nearest(width, height),
    }
}

#[allow(clippy::cast_precision_loss)]
fn nearest(width: i64, height: i64) -> AspectRatio {
    if width <= 0 || height <= 0 {
        return AspectRatio::Square;
    }
    let ratio = width as f64 / height as f64;

    let mut best = AspectRatio::ALL[0];
    let mut best_diff = (best.value() - ratio).abs();
    for candidate in &AspectRatio::ALL[1..] {
        let diff = (candidate.value() - ratio).abs();
        if diff < best_diff {
            best = *candidate;
            best_diff = diff;
        }
    }
    best
}
