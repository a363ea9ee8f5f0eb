//! Membership checks on top of GitHub's membership endpoints, which answer 404 for
//! non-members.

use tracing::trace;

use crate::github::{GitHubApi, GitHubError, Membership, TeamId};

/// Whether `username` is a member of `org`. A pending invitation counts as membership.
pub async fn is_org_member(
    github: &dyn GitHubApi,
    org: &str,
    username: &str,
) -> Result<bool, GitHubError> {
    let member = membership_exists(github.get_org_membership(org, username).await)?;
    trace!("{} member of {}: {}", username, org, member);
    Ok(member)
}

pub async fn is_team_member(
    github: &dyn GitHubApi,
    team: TeamId,
    username: &str,
) -> Result<bool, GitHubError> {
    let member = membership_exists(github.get_team_membership(team, username).await)?;
    trace!("{} member of team {}: {}", username, team, member);
    Ok(member)
}

fn membership_exists(membership: Result<Membership, GitHubError>) -> Result<bool, GitHubError> {
    match membership {
        Ok(_) => Ok(true),
        Err(e) if e.is_not_found() => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::fake::FakeGitHub;

    #[tokio::test]
    async fn test_org_member() {
        let github = FakeGitHub::new().with_org_member("hiimbex");

        assert!(is_org_member(&github, "Jefftestorg", "hiimbex").await.unwrap());
        assert!(!is_org_member(&github, "Jefftestorg", "octocat").await.unwrap());
    }

    #[tokio::test]
    async fn test_team_member() {
        let github = FakeGitHub::new().with_team_member(TeamId(1), "hiimbex");

        assert!(is_team_member(&github, TeamId(1), "hiimbex").await.unwrap());
        assert!(!is_team_member(&github, TeamId(2), "hiimbex").await.unwrap());
    }

    #[tokio::test]
    async fn test_failure_is_not_a_missing_membership() {
        let github = FakeGitHub::new().failing_membership_checks();

        assert!(matches!(
            is_org_member(&github, "Jefftestorg", "hiimbex").await,
            Err(GitHubError::Status { status: 502, .. })
        ));
        assert!(is_team_member(&github, TeamId(1), "hiimbex").await.is_err());
    }
}
