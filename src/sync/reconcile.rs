//! Diffs the desired milestone set against the tracker's current state.
//!
//! Pure: the caller fetches the remote snapshot once and applies the result.
//! Titles are the only join key; dates never participate in matching.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::error::MilerError;
use crate::ports::tracker::{MilestoneState, RemoteMilestone};
use crate::schedule::MilestoneDescriptor;

/// A closed remote milestone that should be reopened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reactivation {
    /// Remote identifier of the closed milestone.
    pub id: String,
    /// Shared title of the milestone and its descriptor.
    pub title: String,
    /// The remote milestone's own due date, kept as-is on reopen.
    pub due_date: Option<NaiveDate>,
}

/// Actions needed to bring the tracker in line with the desired milestones.
///
/// Every desired title lands in exactly one of the three lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationResult {
    /// Descriptors with no remote milestone of the same title.
    pub to_create: Vec<MilestoneDescriptor>,
    /// Closed remote milestones whose title is desired.
    pub to_reactivate: Vec<Reactivation>,
    /// Desired titles already satisfied by an open remote milestone.
    pub already_open: Vec<String>,
}

impl ReconciliationResult {
    /// True when neither creation nor reactivation is needed.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.to_create.is_empty() && self.to_reactivate.is_empty()
    }
}

/// Decide which desired milestones to create and which closed ones to reopen.
///
/// When the tracker holds several milestones with a desired title, an open
/// one satisfies it; otherwise the first closed one in `remote` order is
/// reactivated. Remote milestones with titles outside `desired` are ignored.
///
/// # Errors
///
/// Returns [`MilerError::InvariantViolation`] if `desired` repeats a title.
pub fn reconcile(
    desired: &[MilestoneDescriptor],
    remote: &[RemoteMilestone],
) -> Result<ReconciliationResult, MilerError> {
    let mut seen: HashSet<&str> = HashSet::new();
    for descriptor in desired {
        if !seen.insert(descriptor.title.as_str()) {
            error!(title = %descriptor.title, "duplicate title in desired milestones");
            return Err(MilerError::InvariantViolation { title: descriptor.title.clone() });
        }
    }

    let mut by_title: HashMap<&str, Vec<&RemoteMilestone>> = HashMap::new();
    for milestone in remote {
        by_title.entry(milestone.title.as_str()).or_default().push(milestone);
    }

    let mut result = ReconciliationResult::default();
    for descriptor in desired {
        let Some(matches) = by_title.get(descriptor.title.as_str()) else {
            result.to_create.push(descriptor.clone());
            continue;
        };

        if matches.iter().any(|m| m.state == MilestoneState::Open) {
            result.already_open.push(descriptor.title.clone());
        } else if let Some(closed) = matches.first() {
            result.to_reactivate.push(Reactivation {
                id: closed.id.clone(),
                title: closed.title.clone(),
                due_date: closed.due_date,
            });
        }
    }

    Ok(result)
}
