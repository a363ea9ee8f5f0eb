use std::fmt::Display;

use serde::Deserialize;
use url::Url;

mod pull_request;
pub use pull_request::*;

#[derive(Debug)]
pub enum GitHubEvent {
    PullRequest(PullRequestEvent),
}

/// Kind of account, as reported in the `type` field of users and repository owners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum AccountType {
    User,
    Bot,
    Organization,
    // e.g. `Mannequin` accounts created by migrations
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
pub struct GitHubUser {
    pub login: String,
    pub id: u64,
    pub r#type: AccountType,
}

#[derive(Debug, Deserialize)]
pub struct Repository {
    pub name: String,
    pub full_name: String,
    pub owner: GitHubUser,
}

#[derive(Debug, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub html_url: Url,
    pub title: String,
    pub user: GitHubUser,
    pub merged: Option<bool>,
}

impl Display for PullRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PR #{} by {}", self.number, self.user.login)
    }
}
