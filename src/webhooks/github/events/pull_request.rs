use serde::Deserialize;

use crate::webhooks::github::events::{GitHubUser, PullRequest, Repository};

#[derive(Debug, Deserialize)]
pub struct PullRequestEvent {
    pub action: String,
    pub repository: Repository,
    pub sender: GitHubUser,
    pub pull_request: PullRequest,
}

impl PullRequestEvent {
    pub fn is_closed(&self) -> bool {
        self.action == "closed"
    }
}
