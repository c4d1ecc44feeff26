//! Milestone tracker port: the remote system of record for milestones.

use std::future::Future;
use std::pin::Pin;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::TrackerError;
use crate::schedule::MilestoneDescriptor;

/// Boxed future type alias used by [`MilestoneTracker`] to keep the trait dyn-compatible.
pub type TrackerFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, TrackerError>> + Send + 'a>>;

/// Open/closed state of a remote milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneState {
    /// Accepting issues (GitLab calls this `active`).
    Open,
    /// Closed or completed.
    Closed,
}

/// A milestone as the tracker reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteMilestone {
    /// Tracker-specific identifier used to address the milestone.
    pub id: String,
    /// Milestone title; matched exactly against descriptor titles.
    pub title: String,
    /// Current state.
    pub state: MilestoneState,
    /// Due date, if the milestone has one.
    pub due_date: Option<NaiveDate>,
}

/// Lists, creates and reopens milestones on a remote tracker.
///
/// The scheduling core depends only on these three operations; GitLab,
/// GitHub and cassette replay all sit behind this trait.
pub trait MilestoneTracker: Send + Sync {
    /// Lists every milestone of the project, open and closed.
    ///
    /// # Errors
    ///
    /// Returns an error if the milestones cannot be fetched.
    fn list_milestones(&self) -> TrackerFuture<'_, Vec<RemoteMilestone>>;

    /// Creates a milestone for the given descriptor.
    ///
    /// # Errors
    ///
    /// Returns an error if the tracker rejects the milestone.
    fn create_milestone(&self, descriptor: &MilestoneDescriptor)
        -> TrackerFuture<'_, RemoteMilestone>;

    /// Reopens a closed milestone without changing its dates.
    ///
    /// # Errors
    ///
    /// Returns an error if the milestone cannot be found or updated.
    fn reopen_milestone(&self, id: &str) -> TrackerFuture<'_, RemoteMilestone>;
}
