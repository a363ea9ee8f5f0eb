//! Onboarding of contributors whose pull request got merged.
//!
//! Each closed pull request goes through the same steps: [`qualifies`] filters out anything that
//! isn't a merged human contribution to an organization, [`AccessConfig::resolve`] reads the
//! repository's wishes, [`decide`] picks a single [`InviteAction`] and [`execute`] applies it.

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info, warn};

use crate::{
    github::GitHubApi,
    webhooks::{Event, GitHubEvent},
};

mod access_config;
pub use access_config::AccessConfig;

mod dispatch;
pub use dispatch::{decide, execute, InviteAction};

mod filter;
pub use filter::{qualifies, ClosedPullRequest};

pub mod membership;
pub mod teams;

pub struct Inviter {
    github: Arc<dyn GitHubApi>,
    repo_config_path: String,
    event_timeout: Duration,
}

impl Inviter {
    pub fn new(
        github: Arc<dyn GitHubApi>,
        repo_config_path: String,
        event_timeout: Duration,
    ) -> Self {
        Self {
            github,
            repo_config_path,
            event_timeout,
        }
    }

    /// Handles events one after the other until every sender is dropped.
    ///
    /// Failures are logged and never stop the loop.
    pub async fn run(&self, mut events: UnboundedReceiver<Event>) {
        debug!("running...");

        loop {
            let event = match events.recv().await {
                Some(event) => event,
                None => {
                    info!("all channel senders were dropped, exiting receive loop");
                    break;
                }
            };
            debug!("received event: {:?}", event);

            match tokio::time::timeout(self.event_timeout, self.handle_event(event)).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!("encountered error while handling event: {:#}", e),
                Err(_) => warn!(
                    "gave up on event after {}s without completing",
                    self.event_timeout.as_secs()
                ),
            }
        }
    }

    async fn handle_event(&self, event: Event) -> anyhow::Result<()> {
        match event {
            Event::GitHub(GitHubEvent::PullRequest(event)) => {
                self.handle_closed_pull_request(ClosedPullRequest::from(&event))
                    .await?;
            }
        }

        Ok(())
    }

    /// Grants the author of `pr` the access configured by its repository, unless they
    /// already have it. Returns what was done.
    pub async fn handle_closed_pull_request(
        &self,
        pr: ClosedPullRequest,
    ) -> anyhow::Result<InviteAction> {
        if !qualifies(&pr) {
            info!(
                "pull request by {} on {}/{} is from a bot, unmerged or outside an organization, ignoring",
                pr.author, pr.owner, pr.repo
            );
            return Ok(InviteAction::None);
        }

        let github = self.github.as_ref();

        let config = AccessConfig::resolve(github, &pr, &self.repo_config_path).await;
        debug!("{}/{} uses {:?}", pr.owner, pr.repo, config);

        let action = decide(github, &pr, &config).await.with_context(|| {
            format!(
                "couldn't verify whether {} already has access to {}, not inviting",
                pr.author, pr.owner
            )
        })?;
        debug!("decided {:?} for {}", action, pr.author);

        execute(github, &pr, action)
            .await
            .with_context(|| format!("couldn't apply {:?} for {}", action, pr.author))?;

        Ok(action)
    }
}
