//! Live `MilestoneTracker` adapter for the GitLab REST API v4.

use chrono::NaiveDate;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{send_json, PER_PAGE};
use crate::error::TrackerError;
use crate::ports::tracker::{MilestoneState, MilestoneTracker, RemoteMilestone, TrackerFuture};
use crate::schedule::MilestoneDescriptor;

/// Header carrying the GitLab personal access token.
pub(crate) const TOKEN_HEADER: &str = "PRIVATE-TOKEN";

/// Project milestones on a GitLab instance.
pub struct GitlabTracker {
    client: Client,
    api_url: String,
    token: String,
    project_id: u64,
}

#[derive(Deserialize)]
struct GitlabProject {
    id: u64,
}

#[derive(Deserialize)]
struct GitlabMilestone {
    id: u64,
    title: String,
    state: String,
    due_date: Option<NaiveDate>,
}

impl From<GitlabMilestone> for RemoteMilestone {
    fn from(m: GitlabMilestone) -> Self {
        let state = if m.state == "closed" { MilestoneState::Closed } else { MilestoneState::Open };
        Self { id: m.id.to_string(), title: m.title, state, due_date: m.due_date }
    }
}

#[derive(Serialize)]
struct CreateMilestone<'a> {
    title: &'a str,
    start_date: NaiveDate,
    due_date: NaiveDate,
}

#[derive(Serialize)]
struct UpdateMilestone<'a> {
    state_event: &'a str,
}

impl GitlabTracker {
    /// Resolves the project's numeric id and returns a tracker bound to it.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::ProjectNotFound`] if the project does not
    /// exist, or any transport/status error from the lookup.
    pub async fn connect(
        client: Client,
        base_url: &str,
        token: &str,
        namespace: &str,
        project: &str,
    ) -> Result<Self, TrackerError> {
        let api_url = format!("{base_url}/api/v4");
        let full_path = format!("{namespace}/{project}");
        let url = format!("{api_url}/projects/{}", full_path.replace('/', "%2F"));

        let request = client.get(&url).header(TOKEN_HEADER, token);
        let (found, _): (GitlabProject, _) = match send_json(request, &url).await {
            Err(TrackerError::Status { status: 404, .. }) => {
                return Err(TrackerError::ProjectNotFound(full_path));
            }
            other => other?,
        };
        debug!(project = %full_path, project_id = found.id, "resolved GitLab project");

        Ok(Self { client, api_url, token: token.to_string(), project_id: found.id })
    }

    fn milestones_url(&self) -> String {
        format!("{}/projects/{}/milestones", self.api_url, self.project_id)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(TOKEN_HEADER, &self.token)
    }

    async fn list(&self) -> Result<Vec<RemoteMilestone>, TrackerError> {
        let url = self.milestones_url();
        let mut milestones = Vec::new();
        let mut page: u32 = 1;
        loop {
            let request = self
                .authorized(self.client.get(&url))
                .query(&[("per_page", PER_PAGE.to_string()), ("page", page.to_string())]);
            let (batch, headers): (Vec<GitlabMilestone>, _) = send_json(request, &url).await?;
            milestones.extend(batch.into_iter().map(RemoteMilestone::from));

            let next = headers
                .get("x-next-page")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u32>().ok());
            match next {
                Some(next) if next > page => page = next,
                _ => break,
            }
        }
        debug!(count = milestones.len(), "listed GitLab milestones");
        Ok(milestones)
    }

    async fn create(&self, descriptor: &MilestoneDescriptor) -> Result<RemoteMilestone, TrackerError> {
        let url = self.milestones_url();
        let body = CreateMilestone {
            title: &descriptor.title,
            start_date: descriptor.start_date,
            due_date: descriptor.due_date,
        };
        let request = self.authorized(self.client.post(&url)).json(&body);
        let (created, _): (GitlabMilestone, _) = send_json(request, &url).await?;
        Ok(created.into())
    }

    async fn reopen(&self, id: &str) -> Result<RemoteMilestone, TrackerError> {
        let url = format!("{}/{id}", self.milestones_url());
        let request = self
            .authorized(self.client.put(&url))
            .json(&UpdateMilestone { state_event: "activate" });
        let (updated, _): (GitlabMilestone, _) = send_json(request, &url).await?;
        Ok(updated.into())
    }
}

impl MilestoneTracker for GitlabTracker {
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
