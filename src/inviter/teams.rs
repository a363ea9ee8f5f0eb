use tracing::trace;

use crate::github::{GitHubApi, GitHubError, Team, TeamId};

/// Largest page size accepted by the GitHub API.
const PER_PAGE: u8 = 100;

/// Fetches every team of `org`, following pagination until a partial page comes back.
pub async fn all_teams(github: &dyn GitHubApi, org: &str) -> Result<Vec<Team>, GitHubError> {
    let mut teams = Vec::new();
    let mut page = 1;

    loop {
        let batch = github.list_teams(org, page, PER_PAGE).await?;
        let last_page = batch.len() < usize::from(PER_PAGE);
        teams.extend(batch);

        if last_page {
            break;
        }
        page += 1;
    }

    trace!("{} has {} teams", org, teams.len());
    Ok(teams)
}

/// Looks up the team of `org` whose name or slug is exactly `name`.
pub async fn find_team_id(
    github: &dyn GitHubApi,
    org: &str,
    name: &str,
) -> Result<Option<TeamId>, GitHubError> {
    let teams = all_teams(github, org).await?;

    Ok(teams
        .into_iter()
        .find(|team| team.name == name || team.slug == name)
        .map(|team| team.id))
}
