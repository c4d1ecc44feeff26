//! Replaying adapter for the Clock port.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, NaiveDate, Utc};

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::error::MilerError;
use crate::ports::clock::Clock;

/// Replays recorded clock values from a cassette.
pub struct ReplayingClock {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingClock {
    /// Creates a new replaying clock from a cassette replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl Clock for ReplayingClock {
    /// # Panics
    ///
    /// Panics if the cassette holds no further `clock::now` value.
    fn now(&self) -> DateTime<Utc> {
        let output = next_output(&self.replayer, "clock", "now").unwrap_or_else(|e| panic!("{e}"));
        serde_json::from_value(output)
            .unwrap_or_else(|e| panic!("clock::now: failed to deserialize DateTime<Utc>: {e}"))
    }

    fn today(&self) -> Result<NaiveDate, MilerError> {
        let output = next_output(&self.replayer, "clock", "today").map_err(MilerError::Replay)?;
        replay_result(output).map_err(|e| MilerError::Replay(format!("clock::today: {e}")))
    }
}
