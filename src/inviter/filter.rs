use crate::webhooks::github::{AccountType, PullRequestEvent};

/// The facts about a closed pull request that decide whether its author gets onboarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosedPullRequest {
    pub merged: bool,
    pub author: String,
    pub author_is_bot: bool,
    pub owner: String,
    pub owner_is_organization: bool,
    pub repo: String,
}

impl From<&PullRequestEvent> for ClosedPullRequest {
    fn from(event: &PullRequestEvent) -> Self {
        let author = &event.pull_request.user;
        let owner = &event.repository.owner;

        Self {
            // GitHub omits `merged` on some older payloads, which only happens for unmerged PRs
            merged: event.pull_request.merged.unwrap_or(false),
            author: author.login.clone(),
            author_is_bot: author.r#type == AccountType::Bot,
            owner: owner.login.clone(),
            owner_is_organization: owner.r#type == AccountType::Organization,
            repo: event.repository.name.clone(),
        }
    }
}

/// Whether the pull request is a merged contribution from a human to an organization's
/// repository. Nothing else is acted upon.
pub fn qualifies(pr: &ClosedPullRequest) -> bool {
    !pr.author_is_bot && pr.merged && pr.owner_is_organization
}
