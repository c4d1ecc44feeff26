//! Clock port for obtaining the current time.

use chrono::{DateTime, Local, NaiveDate, Utc};

use crate::error::MilerError;

/// Provides the current time.
///
/// Abstracting time access allows deterministic replay by substituting
/// a recorded clock during tests and cassette playback.
pub trait Clock: Send + Sync {
    /// Returns the current UTC time.
    fn now(&self) -> DateTime<Utc>;

    /// Returns today's date on the host's local calendar.
    ///
    /// Recorded sessions store this date itself, not the instant it came
    /// from, so replay does not depend on the replaying host's timezone.
    ///
    /// # Errors
    ///
    /// Returns [`MilerError::Replay`] when a replayed session holds no date.
    fn today(&self) -> Result<NaiveDate, MilerError> {
        Ok(self.now().with_timezone(&Local).date_naive())
    }
}
