use anyhow::anyhow;
use rocket::{
    http::Status,
    request::{FromRequest, Outcome},
    Request, State,
};
use serde::Deserialize;
use tracing::{debug, error, info, trace, warn};

pub mod events;
pub use events::*;

mod signing;
use signing::SignedGitHubPayload;

use crate::webhooks::{Event, EventSender};

const X_GITHUB_EVENT: &str = "X-GitHub-Event";

/// Shared secret GitHub uses to sign webhook deliveries.
pub struct GitHubSecret(pub String);

#[rocket::post("/api/webhooks/github", data = "<payload>")]
pub fn github_webhook(
    event: GitHubEventType,
    payload: SignedGitHubPayload,
    sender: &State<EventSender>,
) -> Result<&'static str, Status> {
    match event {
        GitHubEventType::Ping => info!("received ping from GitHub"),
        GitHubEventType::Other => trace!("ignoring event we don't act on"),
        GitHubEventType::PullRequest => {
            let event: PullRequestEvent = serde_json::from_str(&payload.0).map_err(|e| {
                warn!("couldn't parse pull_request payload: {}", e);
                Status::BadRequest
            })?;

            if !event.is_closed() {
                trace!("ignoring pull_request action `{}`", event.action);
                return Ok("OK");
            }

            debug!(
                "queueing closed {} on {}",
                event.pull_request, event.repository.full_name
            );
            sender
                .0
                .send(Event::GitHub(GitHubEvent::PullRequest(event)))
                .map_err(|_| {
                    error!("event channel was closed, can't handle pull request");
                    Status::ServiceUnavailable
                })?;
        }
    }

    Ok("OK")
}

#[derive(Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GitHubEventType {
    Ping,
    PullRequest,
    #[serde(other)]
    Other,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for GitHubEventType {
    type Error = anyhow::Error;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let event_types = request.headers().get(X_GITHUB_EVENT).collect::<Vec<_>>();
        if event_types.len() != 1 {
            return Outcome::Error((
                Status::BadRequest,
                anyhow!("request header needs exactly one event type"),
            ));
        }

        let event_type = serde_json::Value::String(event_types[0].to_owned());

        match serde_json::from_value::<GitHubEventType>(event_type) {
            Ok(ev_type) => Outcome::Success(ev_type),
            Err(e) => Outcome::Error((Status::BadRequest, anyhow!(e))),
        }
    }
}
