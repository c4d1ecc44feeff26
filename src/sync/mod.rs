//! Milestone sync: reconcile the desired schedule and apply it to a tracker.
//!
//! Idempotent: re-running never creates a second milestone for a title the
//! tracker already knows, open or closed. Nothing is ever deleted.

pub mod reconcile;

use std::fmt;

use tracing::{info, warn};

use crate::ports::tracker::{MilestoneTracker, RemoteMilestone};

pub use reconcile::{reconcile, Reactivation, ReconciliationResult};

/// Kind of tracker write attempted for one milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncActionKind {
    /// Creating a new milestone.
    Create,
    /// Reopening a closed milestone.
    Reopen,
}

impl fmt::Display for SyncActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => f.write_str("create"),
            Self::Reopen => f.write_str("reopen"),
        }
    }
}

/// A single tracker write that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncFailure {
    /// Title of the milestone involved.
    pub title: String,
    /// What was attempted.
    pub action: SyncActionKind,
    /// Error reported by the tracker.
    pub error: String,
}

/// Outcome of applying a [`ReconciliationResult`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Milestones created, as returned by the tracker.
    pub created: Vec<RemoteMilestone>,
    /// Milestones reopened, as returned by the tracker.
    pub reopened: Vec<RemoteMilestone>,
    /// Writes that failed; the rest of the batch still ran.
    pub failures: Vec<SyncFailure>,
}

/// Applies the planned creations, then the planned reactivations.
///
/// Each write is attempted even if earlier ones failed; failures are logged
/// and collected in the report.
pub async fn apply(tracker: &dyn MilestoneTracker, plan: &ReconciliationResult) -> SyncReport {
    let mut report = SyncReport::default();

    for descriptor in &plan.to_create {
        match tracker.create_milestone(descriptor).await {
            Ok(milestone) => {
                info!(title = %milestone.title, id = %milestone.id, "created milestone");
                report.created.push(milestone);
            }
            Err(e) => {
                warn!(title = %descriptor.title, error = %e, "failed to create milestone");
                report.failures.push(SyncFailure {
                    title: descriptor.title.clone(),
                    action: SyncActionKind::Create,
                    error: e.to_string(),
                });
            }
        }
    }

    for reactivation in &plan.to_reactivate {
        match tracker.reopen_milestone(&reactivation.id).await {
            Ok(milestone) => {
                info!(title = %milestone.title, id = %milestone.id, "reopened milestone");
                report.reopened.push(milestone);
            }
            Err(e) => {
                warn!(title = %reactivation.title, error = %e, "failed to reopen milestone");
                report.failures.push(SyncFailure {
                    title: reactivation.title.clone(),
                    action: SyncActionKind::Reopen,
                    error: e.to_string(),
                });
            }
        }
    }

    report
}

fn format_due(due: Option<chrono::NaiveDate>) -> String {
    due.map_or_else(|| "no due date".to_string(), |d| format!("due {d}"))
}

/// Formats a reconciliation plan as a human-readable list.
#[must_use]
pub fn format_plan(plan: &ReconciliationResult) -> String {
    if plan.is_noop() && plan.already_open.is_empty() {
        return "No milestones in window.".to_string();
    }

    let mut lines = Vec::new();
    for descriptor in &plan.to_create {
        lines.push(format!(
            "  CREATE {} ({} .. {})",
            descriptor.title, descriptor.start_date, descriptor.due_date
        ));
    }
    for reactivation in &plan.to_reactivate {
        lines.push(format!(
            "  REOPEN {} (milestone {}, {})",
            reactivation.title,
            reactivation.id,
            format_due(reactivation.due_date)
        ));
    }
    for title in &plan.already_open {
        lines.push(format!("  OPEN {title}"));
    }
    lines.join("\n")
}

/// Formats a sync report as a human-readable list.
#[must_use]
pub fn format_report(report: &SyncReport) -> String {
    if report.created.is_empty() && report.reopened.is_empty() && report.failures.is_empty() {
        return "Nothing to do: all milestones already open.".to_string();
    }

    let mut lines = Vec::new();
    for milestone in &report.created {
        lines.push(format!(
            "  CREATED {} (milestone {}, {})",
            milestone.title,
            milestone.id,
            format_due(milestone.due_date)
        ));
    }
    for milestone in &report.reopened {
        lines.push(format!(
            "  REOPENED {} (milestone {}, {})",
            milestone.title,
            milestone.id,
            format_due(milestone.due_date)
        ));
    }
    for failure in &report.failures {
        lines.push(format!("  FAILED {} {}: {}", failure.action, failure.title, failure.error));
    }
    lines.join("\n")
}
