//! Recording adapter for the `Clock` port.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, NaiveDate, Utc};

use super::{record_interaction, record_result};
use crate::cassette::recorder::CassetteRecorder;
use crate::error::MilerError;
use crate::ports::Clock;

/// Records clock interactions while delegating to an inner implementation.
pub struct RecordingClock {
    inner: Box<dyn Clock>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingClock {
    /// Creates a new recording clock wrapping the given implementation.
    pub fn new(inner: Box<dyn Clock>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl Clock for RecordingClock {
    fn now(&self) -> DateTime<Utc> {
        let result = self.inner.now();
        record_interaction(&self.recorder, "clock", "now", &(), &result);
        result
    }

    fn today(&self) -> Result<NaiveDate, MilerError> {
        let result = self.inner.today();
        record_result(&self.recorder, "clock", "today", &(), &result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::live::clock::LiveClock;
    use crate::cassette::format::Cassette;

    #[test]
    fn records_now_and_resolved_date() {
        let dir = std::env::temp_dir().join("miler_rec_clock_test");
        let path = dir.join("clock.cassette.yaml");

        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&path, "test")));
        let clock = RecordingClock::new(Box::new(LiveClock), Arc::clone(&recorder));
        let now = clock.now();
        let today = clock.today().unwrap();

        recorder.lock().unwrap().save().unwrap();

        let cassette = Cassette::load(&path).unwrap();
        assert_eq!(cassette.interactions.len(), 2);
        assert_eq!(cassette.interactions[0].port, "clock");
        assert_eq!(cassette.interactions[0].method, "now");
        assert_eq!(cassette.interactions[0].output, serde_json::to_value(now).unwrap());
        assert_eq!(cassette.interactions[1].method, "today");
        assert_eq!(
            cassette.interactions[1].output,
            serde_json::json!({"ok": today.format("%Y-%m-%d").to_string()})
        );

        let _ = std::fs::remove_dir_all(&dir);
    }
}
