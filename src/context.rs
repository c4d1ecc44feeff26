//! Service context bundling the port trait objects a command needs.

use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use crate::adapters::live::clock::LiveClock;
use crate::adapters::recording::{RecordingClock, RecordingTracker};
use crate::adapters::replaying::{ReplayingClock, ReplayingTracker};
use crate::cassette::format::Cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::clock::Clock;
use crate::ports::tracker::MilestoneTracker;

/// Bundles the clock and tracker ports into a single context.
///
/// Constructors wire up different adapter implementations (live,
/// recording, replaying).
pub struct ServiceContext {
    /// Clock for obtaining the reference date.
    pub clock: Box<dyn Clock>,
    /// Milestone tracker gateway.
    pub tracker: Box<dyn MilestoneTracker>,
    /// Shared cassette recorder; saved to disk on drop.
    recorder: Option<Arc<Mutex<CassetteRecorder>>>,
}

impl ServiceContext {
    /// Creates a live context around an already connected tracker.
    #[must_use]
    pub fn live(tracker: Box<dyn MilestoneTracker>) -> Self {
        Self { clock: Box::new(LiveClock), tracker, recorder: None }
    }

    /// Creates a recording context that writes a cassette to `path` on drop.
    ///
    /// The live clock and the given tracker do the actual work; every call
    /// through either port is captured.
    #[must_use]
    pub fn recording(path: &Path, tracker: Box<dyn MilestoneTracker>) -> Self {
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(path, "miler-session")));
        Self {
            clock: Box::new(RecordingClock::new(Box::new(LiveClock), Arc::clone(&recorder))),
            tracker: Box::new(RecordingTracker::new(tracker, Arc::clone(&recorder))),
            recorder: Some(recorder),
        }
    }

    /// Creates a replaying context from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let cassette = Cassette::load(path)?;

        // Each port gets its own replayer so per-port cursors are independent.
        let replayer = || Arc::new(Mutex::new(CassetteReplayer::new(&cassette)));
        Ok(Self {
            clock: Box::new(ReplayingClock::new(replayer())),
            tracker: Box::new(ReplayingTracker::new(replayer())),
            recorder: None,
        })
    }
}

impl Drop for ServiceContext {
    fn drop(&mut self) {
        let Some(recorder) = self.recorder.take() else {
            return;
        };
        let saved = match recorder.lock() {
            Ok(recorder) => recorder.save(),
            Err(_) => {
                warn!("cassette recorder lock poisoned, cassette not written");
                return;
            }
        };
        match saved {
            Ok(path) => info!(path = %path.display(), "cassette written"),
            Err(e) => warn!(error = %e, "failed to write cassette"),
        }
    }
}
