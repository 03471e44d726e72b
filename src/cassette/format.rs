//! On-disk cassette layout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded session: metadata plus the interactions in call order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cassette {
    /// Human-readable name, usually `<timestamp>-<port>`.
    pub name: String,
    /// When recording finished.
    pub recorded_at: DateTime<Utc>,
    /// Git commit the recording was made from.
    pub commit: String,
    /// Recorded calls.
    pub interactions: Vec<Interaction>,
}

/// One call through a port: what went in and what came out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    /// Position across the whole cassette.
    pub seq: u64,
    /// Port name, e.g. `content_generator`.
    pub port: String,
    /// Method name, e.g. `generate_content`.
    pub method: String,
    /// Serialized call input.
    pub input: serde_json::Value,
    /// `{"Ok": ...}` or `{"Err": "..."}`.
    pub output: serde_json::Value,
}
