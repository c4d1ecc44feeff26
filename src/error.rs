//! Error types shared across the scheduler, reconciler and tracker adapters.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised while planning or applying a milestone sync.
#[derive(Debug, Error)]
pub enum MilerError {
    /// The interval string is not one of daily, weekly or monthly.
    #[error("invalid interval {0:?}: expected daily, weekly or monthly")]
    InvalidInterval(String),

    /// The desired milestone set contains the same title twice.
    #[error("duplicate milestone title {title:?} in desired set")]
    InvariantViolation {
        /// The offending title.
        title: String,
    },

    /// The advance window runs past the representable date range.
    #[error("advance window of {advance_days} days from {reference} is out of range")]
    WindowOutOfRange {
        /// First day of the window.
        reference: NaiveDate,
        /// Requested window length.
        advance_days: u32,
    },

    /// Missing or malformed configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A recorded session could not serve the requested value.
    #[error("{0}")]
    Replay(String),

    /// Failure reported by the tracker gateway.
    #[error(transparent)]
    Tracker(#[from] TrackerError),
}

/// Errors raised by a milestone tracker gateway.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request never produced a response.
    #[error("request to {url} failed: {source}")]
    Request {
        /// Requested URL.
        url: String,
        /// Transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The tracker answered with a non-success status.
    #[error("{url} returned HTTP {status}: {body}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Response body, as returned.
        body: String,
    },

    /// The token was rejected.
    #[error("provided token is invalid, access denied")]
    AccessDenied,

    /// The namespace/project pair does not exist on the tracker.
    #[error("project {0} not found")]
    ProjectNotFound(String),

    /// Neither the GitLab nor the GitHub API answered at the base URL.
    #[error("could not access GitLab or GitHub APIs at {0}")]
    UnsupportedApi(String),

    /// The response body did not have the expected shape.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        /// Requested URL.
        url: String,
        /// JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Error served from a recorded cassette.
    #[error("{0}")]
    Replay(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_interval_names_accepted_values() {
        let err = MilerError::InvalidInterval("hourly".into());
        let msg = err.to_string();
        assert!(msg.contains("\"hourly\""));
        assert!(msg.contains("daily, weekly or monthly"));
    }

    #[test]
    fn tracker_errors_are_transparent() {
        let err = MilerError::from(TrackerError::ProjectNotFound("ops/infra".into()));
        assert_eq!(err.to_string(), "project ops/infra not found");
    }
}
