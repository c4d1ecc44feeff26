//! Live adapters for real external interactions.

pub mod clock;
pub mod detect;
pub mod github;
pub mod gitlab;

pub use detect::{connect, detect_flavor};

use reqwest::header::HeaderMap;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::TrackerError;

/// Page size requested from both tracker APIs.
const PER_PAGE: usize = 100;

/// Builds the shared HTTP client.
pub(crate) fn http_client() -> Result<Client, TrackerError> {
    Client::builder()
        .user_agent(concat!("miler/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(TrackerError::Client)
}

/// Sends a request and decodes its JSON body, returning the response headers
/// alongside for pagination.
pub(crate) async fn send_json<T: DeserializeOwned>(
    request: RequestBuilder,
    url: &str,
) -> Result<(T, HeaderMap), TrackerError> {
    let response = request
        .send()
        .await
        .map_err(|source| TrackerError::Request { url: url.to_string(), source })?;

    let status = response.status();
    let headers = response.headers().clone();
    let body = response
        .text()
        .await
        .map_err(|source| TrackerError::Request { url: url.to_string(), source })?;

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(TrackerError::AccessDenied);
    }
    if !status.is_success() {
        return Err(TrackerError::Status { url: url.to_string(), status: status.as_u16(), body });
    }

    let value = serde_json::from_str(&body)
        .map_err(|source| TrackerError::Decode { url: url.to_string(), source })?;
    Ok((value, headers))
}
