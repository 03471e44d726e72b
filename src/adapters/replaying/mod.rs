//! Replaying adapters that serve recorded interactions from cassettes.

pub mod content_generator;

use std::sync::{Arc, Mutex, PoisonError};

use crate::cassette::replayer::CassetteReplayer;

/// Retrieve the next recorded output for a given port and method.
///
/// # Errors
///
/// Returns an error if the cassette has no (more) interactions for the pair.
pub(crate) fn next_output(
    replayer: &Arc<Mutex<CassetteReplayer>>,
    port: &str,
    method: &str,
) -> Result<serde_json::Value, String> {
    let mut guard = replayer.lock().unwrap_or_else(PoisonError::into_inner);
    guard.next_interaction(port, method).map(|i| i.output.clone())
}

/// Outcome of decoding a recorded output.
pub(crate) enum Replayed<T> {
    /// The recorded call succeeded with this value.
    Ok(T),
    /// The recorded call failed with this message.
    Err(String),
}

/// Deserialize a recorded output written with the Ok/Err convention.
///
/// A bare value without either wrapper is treated as `Ok`.
///
/// # Errors
///
/// Returns an error if the `Ok` value does not deserialize as `T`.
pub(crate) fn replay_result<T: serde::de::DeserializeOwned>(
    output: serde_json::Value,
) -> Result<Replayed<T>, serde_json::Error> {
    if let Some(err_val) = output.get("Err").or_else(|| output.get("err")) {
        let msg = err_val.as_str().unwrap_or("replayed error").to_string();
        return Ok(Replayed::Err(msg));
    }
    let ok_val = match output.get("Ok").or_else(|| output.get("ok")) {
        Some(v) => v.clone(),
        None => output,
    };
    serde_json::from_value(ok_val).map(Replayed::Ok)
}
