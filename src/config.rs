//! Tracker connection settings resolved from CLI flags and environment.

use std::fmt;

use clap::ValueEnum;
use reqwest::Url;

use crate::error::MilerError;

/// Which tracker API a base URL speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Flavor {
    /// GitLab REST API v4.
    Gitlab,
    /// GitHub REST API v3.
    Github,
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gitlab => f.write_str("gitlab"),
            Self::Github => f.write_str("github"),
        }
    }
}

/// Everything needed to reach one project's milestones.
#[derive(Clone)]
pub struct TrackerConfig {
    /// Normalized base URL, without trailing slash.
    pub base_url: String,
    /// API token.
    pub token: String,
    /// Group, user or organization owning the project.
    pub namespace: String,
    /// Project or repository name.
    pub project: String,
    /// Forced API flavor; probed when `None`.
    pub flavor: Option<Flavor>,
}

impl fmt::Debug for TrackerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackerConfig")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("namespace", &self.namespace)
            .field("project", &self.project)
            .field("flavor", &self.flavor)
            .finish()
    }
}

impl TrackerConfig {
    /// Builds a config, rejecting missing values and normalizing the URL.
    ///
    /// # Errors
    ///
    /// Returns [`MilerError::Config`] if a required value is missing or the
    /// base URL cannot be parsed.
    pub fn new(
        url: Option<&str>,
        token: Option<&str>,
        namespace: Option<&str>,
        project: Option<&str>,
        flavor: Option<Flavor>,
        allow_http: bool,
    ) -> Result<Self, MilerError> {
        let url = required(url, "--url / MILER_URL")?;
        Ok(Self {
            base_url: normalize_base_url(url, allow_http)?,
            token: required(token, "--token / MILER_TOKEN")?.to_string(),
            namespace: required(namespace, "--namespace / MILER_NAMESPACE")?.to_string(),
            project: required(project, "--project / MILER_PROJECT")?.to_string(),
            flavor,
        })
    }
}

fn required<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str, MilerError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(MilerError::Config(format!("missing {name}"))),
    }
}

/// Normalizes a tracker base URL to HTTPS.
///
/// A bare host gets `https://`. Plain `http://` is upgraded unless
/// `allow_http` is set. A trailing slash is dropped.
///
/// # Errors
///
/// Returns [`MilerError::Config`] for unparseable URLs or schemes other
/// than HTTP(S).
pub fn normalize_base_url(raw: &str, allow_http: bool) -> Result<String, MilerError> {
    let raw = raw.trim();
    let candidate =
        if raw.contains("://") { raw.to_string() } else { format!("https://{raw}") };
    let mut url = Url::parse(&candidate)
        .map_err(|e| MilerError::Config(format!("invalid base URL {raw:?}: {e}")))?;

    match url.scheme() {
        "https" => {}
        "http" if allow_http => {}
        "http" => url
            .set_scheme("https")
            .map_err(|()| MilerError::Config(format!("cannot use https for {raw:?}")))?,
        other => {
            return Err(MilerError::Config(format!("unsupported URL scheme {other:?} in {raw:?}")))
        }
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}
