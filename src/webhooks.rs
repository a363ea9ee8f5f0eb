use rocket::{routes, Build, Rocket};
use tokio::sync::mpsc::UnboundedSender;

pub mod github;
pub use github::{github_webhook, GitHubEvent, GitHubSecret};

use crate::health::health;

pub struct EventSender(pub UnboundedSender<Event>);

#[derive(Debug)]
pub enum Event {
    GitHub(GitHubEvent),
}

/// Builds the HTTP server receiving GitHub deliveries and forwarding them to `sender`.
pub fn server(github_secret: String, sender: UnboundedSender<Event>) -> Rocket<Build> {
    rocket::build()
        .mount("/", routes![github_webhook, health])
        .manage(EventSender(sender))
        .manage(GitHubSecret(github_secret))
}
