//! Replaying adapter for the `MilestoneTracker` port.

use std::sync::{Arc, Mutex};

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::error::TrackerError;
use crate::ports::tracker::{MilestoneTracker, RemoteMilestone, TrackerFuture};
use crate::schedule::MilestoneDescriptor;

/// Serves recorded tracker results from a cassette.
pub struct ReplayingTracker {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingTracker {
    /// Create a replaying tracker backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }

    fn replay<T: serde::de::DeserializeOwned>(&self, method: &str) -> Result<T, TrackerError> {
        let output = next_output(&self.replayer, "tracker", method).map_err(TrackerError::Replay)?;
        replay_result(output)
    }
}

impl MilestoneTracker for ReplayingTracker {
    fn list_milestones(&self) -> TrackerFuture<'_, Vec<RemoteMilestone>> {
        let result = self.replay("list_milestones");
        Box::pin(async move { result })
    }

    fn create_milestone(
        &self,
        _descriptor: &MilestoneDescriptor,
    ) -> TrackerFuture<'_, RemoteMilestone> {
        let result = self.replay("create_milestone");
        Box::pin(async move { result })
    }

    fn reopen_milestone(&self, _id: &str) -> TrackerFuture<'_, RemoteMilestone> {
        let result = self.replay("reopen_milestone");
        Box::pin(async move { result })
    }
}
