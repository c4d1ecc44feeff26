//! Recording adapter for the `MilestoneTracker` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::tracker::{MilestoneTracker, RemoteMilestone, TrackerFuture};
use crate::schedule::MilestoneDescriptor;

/// Records tracker interactions while delegating to an inner implementation.
pub struct RecordingTracker {
    inner: Box<dyn MilestoneTracker>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingTracker {
    /// Creates a new recording tracker wrapping the given implementation.
    pub fn new(inner: Box<dyn MilestoneTracker>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct ReopenInput<'a> {
    id: &'a str,
}

impl MilestoneTracker for RecordingTracker {
    fn list_milestones(&self) -> TrackerFuture<'_, Vec<RemoteMilestone>> {
        Box::pin(async move {
            let result = self.inner.list_milestones().await;
            record_result(&self.recorder, "tracker", "list_milestones", &(), &result);
            result
        })
    }

    fn create_milestone(
        &self,
        descriptor: &MilestoneDescriptor,
    ) -> TrackerFuture<'_, RemoteMilestone> {
        let descriptor = descriptor.clone();
        Box::pin(async move {
            let result = self.inner.create_milestone(&descriptor).await;
            record_result(&self.recorder, "tracker", "create_milestone", &descriptor, &result);
            result
        })
    }

    fn reopen_milestone(&self, id: &str) -> TrackerFuture<'_, RemoteMilestone> {
        let id = id.to_string();
        Box::pin(async move {
            let result = self.inner.reopen_milestone(&id).await;
            record_result(
                &self.recorder,
                "tracker",
                "reopen_milestone",
                &ReopenInput { id: &id },
                &result,
            );
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;
    use crate::cassette::format::Cassette;
    use crate::error::TrackerError;
    use crate::ports::tracker::MilestoneState;

    /// Tracker that creates everything and can reopen nothing.
    struct StubTracker;

    impl MilestoneTracker for StubTracker {
        fn list_milestones(&self) -> TrackerFuture<'_, Vec<RemoteMilestone>> {
            Box::pin(async { Ok(Vec::new()) })
        }

        fn create_milestone(
            &self,
            descriptor: &MilestoneDescriptor,
        ) -> TrackerFuture<'_, RemoteMilestone> {
            let milestone = RemoteMilestone {
                id: "11".into(),
                title: descriptor.title.clone(),
                state: MilestoneState::Open,
                due_date: Some(descriptor.due_date),
            };
            Box::pin(async move { Ok(milestone) })
        }

        fn reopen_milestone(&self, id: &str) -> TrackerFuture<'_, RemoteMilestone> {
            let err = TrackerError::Replay(format!("milestone {id} not found"));
            Box::pin(async move { Err(err) })
        }
    }

    #[tokio::test]
    async fn records_results_and_errors() {
        let dir = std::env::temp_dir().join("miler_rec_tracker_test");
        let path = dir.join("tracker.cassette.yaml");

        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&path, "test")));
        let tracker = RecordingTracker::new(Box::new(StubTracker), Arc::clone(&recorder));

        let day = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let descriptor =
            MilestoneDescriptor { title: "2024-01-10".into(), start_date: day, due_date: day };
        tracker.list_milestones().await.unwrap();
        tracker.create_milestone(&descriptor).await.unwrap();
        assert!(tracker.reopen_milestone("99").await.is_err());

        recorder.lock().unwrap().save().unwrap();

        let cassette = Cassette::load(&path).unwrap();
        let methods: Vec<&str> = cassette.interactions.iter().map(|i| i.method.as_str()).collect();
        assert_eq!(methods, vec!["list_milestones", "create_milestone", "reopen_milestone"]);
        assert_eq!(cassette.interactions[0].output, json!({"ok": []}));
        assert_eq!(cassette.interactions[1].input["title"], json!("2024-01-10"));
        assert_eq!(cassette.interactions[1].output["ok"]["state"], json!("open"));
        assert_eq!(cassette.interactions[2].input, json!({"id": "99"}));
        assert_eq!(cassette.interactions[2].output, json!({"err": "milestone 99 not found"}));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
