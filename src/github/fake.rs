//! Recording [`GitHubApi`] double used by the inviter tests.

use std::sync::Mutex;

use rocket::async_trait;

use crate::github::{GitHubApi, GitHubError, Membership, MembershipState, Role, Team, TeamId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GetOrgMembership { org: String, username: String },
    AddOrgMembership { org: String, username: String, role: Role },
    ListTeams { org: String, page: u32 },
    GetTeamMembership { team: TeamId, username: String },
    AddTeamMembership { team: TeamId, username: String, role: Role },
    AddCollaborator { owner: String, repo: String, username: String },
    GetRepoFile { owner: String, repo: String, path: String },
}

impl Call {
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Call::AddOrgMembership { .. }
                | Call::AddTeamMembership { .. }
                | Call::AddCollaborator { .. }
        )
    }
}

#[derive(Default)]
pub struct FakeGitHub {
    org_members: Vec<String>,
    team_members: Vec<(TeamId, String)>,
    teams: Vec<Team>,
    repo_file: Option<String>,
    repo_file_failure: bool,
    membership_failure: bool,
    stalled_membership_checks: Mutex<usize>,
    team_listing_failure: bool,
    mutation_failure: bool,
    calls: Mutex<Vec<Call>>,
}

fn server_error() -> GitHubError {
    GitHubError::Status {
        status: 502,
        message: "Server Error".to_string(),
    }
}

fn active_member() -> Membership {
    Membership {
        state: MembershipState::Active,
        role: "member".to_string(),
    }
}

impl FakeGitHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_org_member(mut self, username: &str) -> Self {
        self.org_members.push(username.to_string());
        self
    }

    pub fn with_team_member(mut self, team: TeamId, username: &str) -> Self {
        self.team_members.push((team, username.to_string()));
        self
    }

    pub fn with_team(mut self, id: u64, name: &str, slug: &str) -> Self {
        self.teams.push(Team {
            id: TeamId(id),
            name: name.to_string(),
            slug: slug.to_string(),
        });
        self
    }

    pub fn with_repo_file(mut self, content: &str) -> Self {
        self.repo_file = Some(content.to_string());
        self
    }

    pub fn failing_repo_file(mut self) -> Self {
        self.repo_file_failure = true;
        self
    }

    pub fn failing_membership_checks(mut self) -> Self {
        self.membership_failure = true;
        self
    }

    /// The next `count` organization membership checks never complete.
    pub fn stalling_membership_checks(self, count: usize) -> Self {
        *self.stalled_membership_checks.lock().unwrap() = count;
        self
    }

    pub fn failing_team_listing(mut self) -> Self {
        self.team_listing_failure = true;
        self
    }

    pub fn failing_mutations(mut self) -> Self {
        self.mutation_failure = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn mutations(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(Call::is_mutation)
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn mutation_result(&self) -> Result<(), GitHubError> {
        if self.mutation_failure {
            Err(server_error())
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl GitHubApi for FakeGitHub {
    async fn get_org_membership(
        &self,
        org: &str,
        username: &str,
    ) -> Result<Membership, GitHubError> {
        self.record(Call::GetOrgMembership {
            org: org.to_string(),
            username: username.to_string(),
        });

        let stalled = {
            let mut remaining = self.stalled_membership_checks.lock().unwrap();
            let stalled = *remaining > 0;
            *remaining = remaining.saturating_sub(1);
            stalled
        };
        if stalled {
            std::future::pending::<()>().await;
        }

        if self.membership_failure {
            Err(server_error())
        } else if self.org_members.iter().any(|member| member == username) {
            Ok(active_member())
        } else {
            Err(GitHubError::NotFound(format!(
                "/orgs/{}/memberships/{}",
                org, username
            )))
        }
    }

    async fn add_org_membership(
        &self,
        org: &str,
        username: &str,
        role: Role,
    ) -> Result<(), GitHubError> {
        self.record(Call::AddOrgMembership {
            org: org.to_string(),
            username: username.to_string(),
            role,
        });
        self.mutation_result()
    }

    async fn list_teams(
        &self,
        org: &str,
        page: u32,
        per_page: u8,
    ) -> Result<Vec<Team>, GitHubError> {
        self.record(Call::ListTeams {
            org: org.to_string(),
            page,
        });

        if self.team_listing_failure {
            return Err(server_error());
        }

        let size = usize::from(per_page);
        let skip = (page.saturating_sub(1) as usize) * size;
        Ok(self.teams.iter().skip(skip).take(size).cloned().collect())
    }

    async fn get_team_membership(
        &self,
        team: TeamId,
        username: &str,
    ) -> Result<Membership, GitHubError> {
        self.record(Call::GetTeamMembership {
            team,
            username: username.to_string(),
        });

        if self.membership_failure {
            Err(server_error())
        } else if self
            .team_members
            .iter()
            .any(|(id, member)| *id == team && member == username)
        {
            Ok(active_member())
        } else {
            Err(GitHubError::NotFound(format!(
                "/teams/{}/memberships/{}",
                team, username
            )))
        }
    }

    async fn add_team_membership(
        &self,
        team: TeamId,
        username: &str,
        role: Role,
    ) -> Result<(), GitHubError> {
        self.record(Call::AddTeamMembership {
            team,
            username: username.to_string(),
            role,
        });
        self.mutation_result()
    }

    async fn add_collaborator(
        &self,
        owner: &str,
        repo: &str,
        username: &str,
    ) -> Result<(), GitHubError> {
        self.record(Call::AddCollaborator {
            owner: owner.to_string(),
            repo: repo.to_string(),
            username: username.to_string(),
        });
        self.mutation_result()
    }

    async fn get_repo_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<String, GitHubError> {
        self.record(Call::GetRepoFile {
            owner: owner.to_string(),
            repo: repo.to_string(),
            path: path.to_string(),
        });

        if self.repo_file_failure {
            return Err(server_error());
        }

        self.repo_file.clone().ok_or_else(|| {
            GitHubError::NotFound(format!("/repos/{}/{}/contents/{}", owner, repo, path))
        })
    }
}
