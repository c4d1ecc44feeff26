//! Replaying adapters that serve recorded interactions.

pub mod clock;
pub mod tracker;

pub use clock::ReplayingClock;
pub use tracker::ReplayingTracker;

use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;

use crate::cassette::replayer::CassetteReplayer;
use crate::error::TrackerError;

/// Take the output of the next recorded call for `port::method`.
pub(crate) fn next_output(
    replayer: &Arc<Mutex<CassetteReplayer>>,
    port: &str,
    method: &str,
) -> Result<serde_json::Value, String> {
    let mut guard = replayer.lock().map_err(|_| "replayer lock poisoned".to_string())?;
    guard.next_interaction(port, method).map(|interaction| interaction.output.clone())
}

/// Decode a recorded `{"ok": value}` / `{"err": message}` output.
///
/// Mirror of `recording::record_result`.
pub(crate) fn replay_result<T: DeserializeOwned>(
    output: serde_json::Value,
) -> Result<T, TrackerError> {
    if let Some(err) = output.get("err") {
        let message = err.as_str().map_or_else(|| err.to_string(), str::to_string);
        return Err(TrackerError::Replay(message));
    }
    let Some(ok) = output.get("ok") else {
        return Err(TrackerError::Replay(format!("malformed recorded result: {output}")));
    };
    serde_json::from_value(ok.clone())
        .map_err(|e| TrackerError::Replay(format!("failed to decode recorded result: {e}")))
}
