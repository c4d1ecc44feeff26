//! Live `MilestoneTracker` adapter for the GitHub REST API v3.

use chrono::{DateTime, NaiveTime, Utc};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{send_json, PER_PAGE};
use crate::error::TrackerError;
use crate::ports::tracker::{MilestoneState, MilestoneTracker, RemoteMilestone, TrackerFuture};
use crate::schedule::MilestoneDescriptor;

/// Media type pinning the v3 API.
pub(crate) const ACCEPT_V3: &str = "application/vnd.github.v3+json";

/// Repository milestones on GitHub (or GitHub Enterprise).
///
/// GitHub milestones carry no start date, so the descriptor's start date is
/// written into the description instead.
pub struct GithubTracker {
    client: Client,
    repo_url: String,
    token: String,
}

#[derive(Deserialize)]
struct GithubMilestone {
    number: u64,
    title: String,
    state: String,
    due_on: Option<DateTime<Utc>>,
}

impl From<GithubMilestone> for RemoteMilestone {
    fn from(m: GithubMilestone) -> Self {
        let state = if m.state == "closed" { MilestoneState::Closed } else { MilestoneState::Open };
        Self {
            id: m.number.to_string(),
            title: m.title,
            state,
            due_date: m.due_on.map(|d| d.date_naive()),
        }
    }
}

#[derive(Serialize)]
struct CreateMilestone<'a> {
    title: &'a str,
    state: &'a str,
    description: String,
    due_on: DateTime<Utc>,
}

#[derive(Serialize)]
struct UpdateMilestone<'a> {
    state: &'a str,
}

impl GithubTracker {
    /// Creates a tracker for `<base_url>/repos/<namespace>/<project>`.
    #[must_use]
    pub fn new(client: Client, base_url: &str, token: &str, namespace: &str, project: &str) -> Self {
        Self {
            client,
            repo_url: format!("{base_url}/repos/{namespace}/{project}"),
            token: token.to_string(),
        }
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(ACCEPT, ACCEPT_V3).header(AUTHORIZATION, format!("token {}", self.token))
    }

    async fn list(&self) -> Result<Vec<RemoteMilestone>, TrackerError> {
        let url = format!("{}/milestones", self.repo_url);
        let mut milestones = Vec::new();
        let mut page: u32 = 1;
        loop {
            let request = self.authorized(self.client.get(&url)).query(&[
                ("state", "all".to_string()),
                ("per_page", PER_PAGE.to_string()),
                ("page", page.to_string()),
            ]);
            let (batch, _): (Vec<GithubMilestone>, _) = send_json(request, &url).await?;
            let full_page = batch.len() >= PER_PAGE;
            milestones.extend(batch.into_iter().map(RemoteMilestone::from));
            if !full_page {
                break;
            }
            page += 1;
        }
        debug!(count = milestones.len(), "listed GitHub milestones");
        Ok(milestones)
    }

    async fn create(&self, descriptor: &MilestoneDescriptor) -> Result<RemoteMilestone, TrackerError> {
        let url = format!("{}/milestones", self.repo_url);
        let body = CreateMilestone {
            title: &descriptor.title,
            state: "open",
            description: format!(
                "Milestone from {} to {}",
                descriptor.start_date, descriptor.due_date
            ),
            due_on: descriptor.due_date.and_time(NaiveTime::MIN).and_utc(),
        };
        let request = self.authorized(self.client.post(&url)).json(&body);
        let (created, _): (GithubMilestone, _) = send_json(request, &url).await?;
        Ok(created.into())
    }

    async fn reopen(&self, number: &str) -> Result<RemoteMilestone, TrackerError> {
        let url = format!("{}/milestones/{number}", self.repo_url);
        let request =
            self.authorized(self.client.patch(&url)).json(&UpdateMilestone { state: "open" });
        let (updated, _): (GithubMilestone, _) = send_json(request, &url).await?;
        Ok(updated.into())
    }
}

impl MilestoneTracker for GithubTracker {
    fn list_milestones(&self) -> TrackerFuture<'_, Vec<RemoteMilestone>> {
        Box::pin(self.list())
    }

    fn create_milestone(
        &self,
        descriptor: &MilestoneDescriptor,
    ) -> TrackerFuture<'_, RemoteMilestone> {
        let descriptor = descriptor.clone();
        Box::pin(async move { self.create(&descriptor).await })
    }

    fn reopen_milestone(&self, id: &str) -> TrackerFuture<'_, RemoteMilestone> {
        let id = id.to_string();
        Box::pin(async move { self.reopen(&id).await })
    }
}
