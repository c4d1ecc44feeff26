//! API flavor detection and live tracker construction.

use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use tracing::{debug, info};

use super::github::{GithubTracker, ACCEPT_V3};
use super::gitlab::{GitlabTracker, TOKEN_HEADER};
use super::http_client;
use crate::config::{Flavor, TrackerConfig};
use crate::error::TrackerError;
use crate::ports::tracker::MilestoneTracker;

/// Probes the base URL to find out which tracker API answers there.
///
/// GitLab is tried first via its version endpoint, then GitHub via the
/// repository endpoint. The first `200 OK` wins.
///
/// # Errors
///
/// - [`TrackerError::AccessDenied`] if a probe answers 401 or 403.
/// - [`TrackerError::ProjectNotFound`] if the last probe answers 404.
/// - [`TrackerError::UnsupportedApi`] if no probe succeeds otherwise.
/// - [`TrackerError::Request`] if a probe cannot be sent.
pub async fn detect_flavor(client: &Client, config: &TrackerConfig) -> Result<Flavor, TrackerError> {
    let mut last_status = None;

    for flavor in [Flavor::Gitlab, Flavor::Github] {
        let (url, request) = match flavor {
            Flavor::Gitlab => {
                let url = format!("{}/api/v4/version", config.base_url);
                let request = client.get(&url).header(TOKEN_HEADER, &config.token);
                (url, request)
            }
            Flavor::Github => {
                let url =
                    format!("{}/repos/{}/{}", config.base_url, config.namespace, config.project);
                let request = client
                    .get(&url)
                    .header(ACCEPT, ACCEPT_V3)
                    .header(AUTHORIZATION, format!("token {}", config.token));
                (url, request)
            }
        };

        let response = request
            .send()
            .await
            .map_err(|source| TrackerError::Request { url: url.clone(), source })?;
        let status = response.status();
        debug!(%flavor, %url, status = status.as_u16(), "probed tracker API");

        if status == StatusCode::OK {
            return Ok(flavor);
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(TrackerError::AccessDenied);
        }
        last_status = Some(status);
    }

    if last_status == Some(StatusCode::NOT_FOUND) {
        Err(TrackerError::ProjectNotFound(config.project.clone()))
    } else {
        Err(TrackerError::UnsupportedApi(config.base_url.clone()))
    }
}

/// Connects to the configured tracker, detecting its flavor unless forced.
///
/// # Errors
///
/// Returns an error if detection fails or the project cannot be resolved.
pub async fn connect(config: &TrackerConfig) -> Result<Box<dyn MilestoneTracker>, TrackerError> {
    let client = http_client()?;
    let flavor = match config.flavor {
        Some(flavor) => flavor,
        None => detect_flavor(&client, config).await?,
    };
    info!(%flavor, base_url = %config.base_url, "using tracker API");

    match flavor {
        Flavor::Gitlab => {
            let tracker = GitlabTracker::connect(
                client,
                &config.base_url,
                &config.token,
                &config.namespace,
                &config.project,
            )
            .await?;
            Ok(Box::new(tracker))
        }
        Flavor::Github => Ok(Box::new(GithubTracker::new(
            client,
            &config.base_url,
            &config.token,
            &config.namespace,
            &config.project,
        ))),
    }
}
