//! Onboards contributors of an organization once their first pull request gets merged.
//!
//! GitHub deliveries are received by the [`webhooks`] server and handed over to the
//! [`inviter::Inviter`], which grants the author organization membership, team membership or
//! outside-collaborator access depending on the repository's configuration.

pub mod config;
pub mod github;
pub mod health;
pub mod inviter;
pub mod webhooks;
