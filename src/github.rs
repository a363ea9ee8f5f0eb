//! Access to the GitHub REST API.
//!
//! Everything the inviter needs from GitHub goes through the [`GitHubApi`] trait, so the
//! decision logic can be exercised against a recording fake in tests.

use std::fmt::Display;

use rocket::async_trait;
use serde::{Deserialize, Serialize};

mod client;
pub use client::GitHubClient;

mod error;
pub use error::GitHubError;

#[cfg(test)]
pub(crate) mod fake;

#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// `GET /orgs/{org}/memberships/{username}`, a 404 means the user isn't part of the org.
    async fn get_org_membership(&self, org: &str, username: &str)
        -> Result<Membership, GitHubError>;

    async fn add_org_membership(
        &self,
        org: &str,
        username: &str,
        role: Role,
    ) -> Result<(), GitHubError>;

    /// Fetches a single page of the organization's teams (pages start at 1).
    async fn list_teams(&self, org: &str, page: u32, per_page: u8)
        -> Result<Vec<Team>, GitHubError>;

    async fn get_team_membership(
        &self,
        team: TeamId,
        username: &str,
    ) -> Result<Membership, GitHubError>;

    async fn add_team_membership(
        &self,
        team: TeamId,
        username: &str,
        role: Role,
    ) -> Result<(), GitHubError>;

    async fn add_collaborator(
        &self,
        owner: &str,
        repo: &str,
        username: &str,
    ) -> Result<(), GitHubError>;

    /// Returns the raw content of a file stored in a repository's default branch.
    async fn get_repo_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<String, GitHubError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct TeamId(pub u64);

impl Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Member,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipState {
    Active,
    /// The user was invited but hasn't accepted yet.
    Pending,
    #[serde(other)]
    Other,
}

/// A membership record. Only its existence matters to the inviter, the fields are informative.
#[derive(Debug, Clone, Deserialize)]
pub struct Membership {
    pub state: MembershipState,
    #[serde(default)]
    pub role: String,
}
