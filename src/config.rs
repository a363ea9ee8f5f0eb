use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;
use url::Url;

const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

#[derive(Deserialize)]
pub struct InviterConfig {
    /// Secret shared with GitHub, used to check the signature of webhook deliveries
    pub github_secret: String,
    /// Token used to call the GitHub API. It needs to be able to manage organization members
    /// and repository collaborators.
    pub github_token: String,
    /// Root of the GitHub REST API, set it for GitHub Enterprise. Defaults to github.com.
    pub github_api_url: Option<Url>,
    /// Path of the per-repository configuration file, relative to the repository root.
    #[serde(default = "default_repo_config_path")]
    pub repo_config_path: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Upper bound on the time spent handling a single event, all API calls included.
    #[serde(default = "default_event_timeout_secs")]
    pub event_timeout_secs: u64,
}

fn default_repo_config_path() -> String {
    ".github/invite-contributors.yml".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_event_timeout_secs() -> u64 {
    60
}

impl InviterConfig {
    pub fn github_api_url(&self) -> anyhow::Result<Url> {
        match &self.github_api_url {
            Some(url) => Ok(url.clone()),
            None => Url::parse(DEFAULT_GITHUB_API_URL).with_context(|| {
                format!("invalid default GitHub API url {}", DEFAULT_GITHUB_API_URL)
            }),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn event_timeout(&self) -> Duration {
        Duration::from_secs(self.event_timeout_secs)
    }
}
