use serde::Deserialize;
use tracing::{debug, warn};

use crate::{github::GitHubApi, inviter::ClosedPullRequest};

/// Which kind of access a repository grants to its new contributors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessConfig {
    /// Invite the contributor to the organization.
    Default,
    /// Invite the contributor to the team with this name or slug.
    Team(String),
    /// Only add the contributor as a collaborator on the repository.
    OutsideCollaborator,
}

/// Contents of the configuration file stored in the repository.
#[derive(Debug, Default, Deserialize)]
struct RepoConfigFile {
    team: Option<String>,
    #[serde(rename = "isOutside")]
    is_outside: Option<bool>,
}

impl From<RepoConfigFile> for AccessConfig {
    fn from(file: RepoConfigFile) -> Self {
        if file.is_outside.unwrap_or(false) {
            return AccessConfig::OutsideCollaborator;
        }

        match file.team {
            Some(team) if !team.is_empty() => AccessConfig::Team(team),
            _ => AccessConfig::Default,
        }
    }
}

impl AccessConfig {
    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        if is_empty_document(content) {
            return Ok(AccessConfig::Default);
        }

        let file: RepoConfigFile = serde_yaml::from_str(content)?;
        Ok(file.into())
    }

    /// Reads the configuration file at `path` in the pull request's repository.
    ///
    /// A repository without configuration, or with one that can't be fetched or parsed, gets
    /// [`AccessConfig::Default`].
    pub async fn resolve(github: &dyn GitHubApi, pr: &ClosedPullRequest, path: &str) -> Self {
        let content = match github.get_repo_file(&pr.owner, &pr.repo, path).await {
            Ok(content) => content,
            Err(e) if e.is_not_found() => {
                debug!("no {} in {}/{}, using defaults", path, pr.owner, pr.repo);
                return AccessConfig::Default;
            }
            Err(e) => {
                warn!(
                    "couldn't fetch {} in {}/{}, using defaults: {}",
                    path, pr.owner, pr.repo, e
                );
                return AccessConfig::Default;
            }
        };

        match Self::parse(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "couldn't parse {} in {}/{}, using defaults: {}",
                    path, pr.owner, pr.repo, e
                );
                AccessConfig::Default
            }
        }
    }
}

/// Whether `content` holds nothing but blank lines, comments and document markers.
fn is_empty_document(content: &str) -> bool {
    content.lines().map(str::trim).all(|line| {
        line.is_empty() || line.starts_with('#') || line == "---" || line == "..."
    })
}
