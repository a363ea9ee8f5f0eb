use std::time::Duration;

use reqwest::{
    header::{self, HeaderMap, HeaderValue},
    RequestBuilder, Response, StatusCode,
};
use rocket::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::trace;
use url::Url;

use crate::github::{GitHubApi, GitHubError, Membership, Role, Team, TeamId};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
const JSON_MEDIA_TYPE: &str = "application/vnd.github+json";
// asks the contents API for the file itself instead of a base64-encoded JSON envelope
const RAW_MEDIA_TYPE: &str = "application/vnd.github.raw";

/// [`GitHubApi`] implementation talking to the REST API with a token.
pub struct GitHubClient {
    http: reqwest::Client,
    api_url: Url,
}

#[derive(Serialize)]
struct RoleBody {
    role: Role,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl GitHubClient {
    /// Builds a client authenticating every request with `token`.
    ///
    /// `api_url` is `https://api.github.com` for github.com, or the `/api/v3` root of a
    /// GitHub Enterprise instance.
    pub fn new(token: &str, api_url: Url, timeout: Duration) -> anyhow::Result<Self> {
        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", token))?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, authorization);
        headers.insert(header::ACCEPT, HeaderValue::from_static(JSON_MEDIA_TYPE));

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self { http, api_url })
    }

    fn endpoint<'a>(
        &self,
        segments: impl IntoIterator<Item = &'a str>,
    ) -> Result<Url, GitHubError> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|()| GitHubError::InvalidUrl(self.api_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, GitHubError> {
        let response = request.send().await.map_err(GitHubError::Transport)?;
        let status = response.status();
        trace!("GitHub API answered {} for {}", status, response.url());

        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::NOT_FOUND {
            return Err(GitHubError::NotFound(response.url().path().to_string()));
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.message)
            .unwrap_or(text);

        Err(GitHubError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn get_org_membership(
        &self,
        org: &str,
        username: &str,
    ) -> Result<Membership, GitHubError> {
        let url = self.endpoint(["orgs", org, "memberships", username])?;
        self.send(self.http.get(url))
            .await?
            .json()
            .await
            .map_err(GitHubError::Decode)
    }

    async fn add_org_membership(
        &self,
        org: &str,
        username: &str,
        role: Role,
    ) -> Result<(), GitHubError> {
        let url = self.endpoint(["orgs", org, "memberships", username])?;
        self.send(self.http.put(url).json(&RoleBody { role }))
            .await?;
        Ok(())
    }

    async fn list_teams(
        &self,
        org: &str,
        page: u32,
        per_page: u8,
    ) -> Result<Vec<Team>, GitHubError> {
        let url = self.endpoint(["orgs", org, "teams"])?;
        let query = [("per_page", u32::from(per_page)), ("page", page)];
        self.send(self.http.get(url).query(&query))
            .await?
            .json()
            .await
            .map_err(GitHubError::Decode)
    }

    async fn get_team_membership(
        &self,
        team: TeamId,
        username: &str,
    ) -> Result<Membership, GitHubError> {
        let team = team.to_string();
        let url = self.endpoint(["teams", team.as_str(), "memberships", username])?;
        self.send(self.http.get(url))
            .await?
            .json()
            .await
            .map_err(GitHubError::Decode)
    }

    async fn add_team_membership(
        &self,
        team: TeamId,
        username: &str,
        role: Role,
    ) -> Result<(), GitHubError> {
        let team = team.to_string();
        let url = self.endpoint(["teams", team.as_str(), "memberships", username])?;
        self.send(self.http.put(url).json(&RoleBody { role }))
            .await?;
        Ok(())
    }

    async fn add_collaborator(
        &self,
        owner: &str,
        repo: &str,
        username: &str,
    ) -> Result<(), GitHubError> {
        let url = self.endpoint(["repos", owner, repo, "collaborators", username])?;
        self.send(self.http.put(url).json(&json!({ "permission": "push" })))
            .await?;
        Ok(())
    }

    async fn get_repo_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<String, GitHubError> {
        let segments = ["repos", owner, repo, "contents"]
            .into_iter()
            .chain(path.split('/').filter(|segment| !segment.is_empty()));
        let url = self.endpoint(segments)?;

        self.send(
            self.http
                .get(url)
                .header(header::ACCEPT, HeaderValue::from_static(RAW_MEDIA_TYPE)),
        )
        .await?
        .text()
        .await
        .map_err(GitHubError::Decode)
    }
}
