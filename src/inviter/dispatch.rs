use tracing::info;

use crate::{
    github::{GitHubApi, GitHubError, Role, TeamId},
    inviter::{membership::is_org_member, teams::find_team_id, AccessConfig, ClosedPullRequest},
};

/// The single change applied for a merged contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InviteAction {
    /// The author already has access.
    None,
    InviteToOrganization,
    InviteToTeam(TeamId),
    AddOutsideCollaborator,
}

/// Picks what to grant the author of `pr`.
///
/// Outside collaboration wins over everything else, then team membership, then organization
/// membership. A team that can't be found falls back to an organization invitation. Whatever
/// the mode, an author who is already part of the organization is left alone.
pub async fn decide(
    github: &dyn GitHubApi,
    pr: &ClosedPullRequest,
    config: &AccessConfig,
) -> Result<InviteAction, GitHubError> {
    match config {
        AccessConfig::OutsideCollaborator => {
            if already_onboarded(github, pr).await? {
                return Ok(InviteAction::None);
            }
            Ok(InviteAction::AddOutsideCollaborator)
        }
        AccessConfig::Team(name) => match find_team_id(github, &pr.owner, name).await? {
            Some(team) => {
                if already_onboarded(github, pr).await? {
                    return Ok(InviteAction::None);
                }
                Ok(InviteAction::InviteToTeam(team))
            }
            None => {
                info!(
                    "team `{}` doesn't exist in {}, inviting to the organization instead",
                    name, pr.owner
                );
                decide_default(github, pr).await
            }
        },
        AccessConfig::Default => decide_default(github, pr).await,
    }
}

async fn decide_default(
    github: &dyn GitHubApi,
    pr: &ClosedPullRequest,
) -> Result<InviteAction, GitHubError> {
    if already_onboarded(github, pr).await? {
        return Ok(InviteAction::None);
    }
    Ok(InviteAction::InviteToOrganization)
}

async fn already_onboarded(
    github: &dyn GitHubApi,
    pr: &ClosedPullRequest,
) -> Result<bool, GitHubError> {
    let member = is_org_member(github, &pr.owner, &pr.author).await?;
    if member {
        info!(
            "{} is already part of {} (or was invited), nothing to do",
            pr.author, pr.owner
        );
    }
    Ok(member)
}

/// Applies `action` with at most one call to GitHub.
pub async fn execute(
    github: &dyn GitHubApi,
    pr: &ClosedPullRequest,
    action: InviteAction,
) -> Result<(), GitHubError> {
    match action {
        InviteAction::None => {}
        InviteAction::InviteToOrganization => {
            github
                .add_org_membership(&pr.owner, &pr.author, Role::Member)
                .await?;
            info!("invited {} to {}", pr.author, pr.owner);
        }
        InviteAction::InviteToTeam(team) => {
            github
                .add_team_membership(team, &pr.author, Role::Member)
                .await?;
            info!("invited {} to team {} of {}", pr.author, team, pr.owner);
        }
        InviteAction::AddOutsideCollaborator => {
            github
                .add_collaborator(&pr.owner, &pr.repo, &pr.author)
                .await?;
            info!(
                "added {} as outside collaborator on {}/{}",
                pr.author, pr.owner, pr.repo
            );
        }
    }

    Ok(())
}
