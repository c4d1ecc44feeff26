//! Milestone schedule: interval kinds and the descriptors they produce.

mod bucket;

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::MilerError;

pub use bucket::generate_descriptors;

/// Bucket size used to cut the advance window into milestones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interval {
    /// One milestone per calendar day.
    Daily,
    /// One milestone per ISO week (Monday through Sunday).
    Weekly,
    /// One milestone per calendar month.
    Monthly,
}

impl Interval {
    /// Lowercase name as accepted on the command line.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = MilerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            _ => Err(MilerError::InvalidInterval(s.to_string())),
        }
    }
}

/// A milestone that should exist on the tracker.
///
/// The title is the join key against remote milestones. It depends only on
/// the interval and the period the bucket falls in, so repeated runs on
/// different days produce the same title for the same period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneDescriptor {
    /// Bucket label, unique within one generated sequence.
    pub title: String,
    /// First day covered by the milestone.
    pub start_date: NaiveDate,
    /// Last day covered by the milestone.
    pub due_date: NaiveDate,
}
