use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context};
use clap::Parser;
use tokio::sync::mpsc::unbounded_channel;

use invite_contributors::{config::InviterConfig, github::GitHubClient, inviter::Inviter, webhooks};

#[derive(Parser)]
#[clap(version)]
struct Opts {
    /// Configuration file for invite-contributors
    #[clap(short, long)]
    config: PathBuf,
}

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let opts = Opts::parse();
    let config_file = File::open(&opts.config)
        .with_context(|| format!("couldn't open {}:", opts.config.display()))?;
    let config: InviterConfig = serde_yaml::from_reader(BufReader::new(config_file))
        .context("couldn't parse config file")?;

    let github = GitHubClient::new(
        &config.github_token,
        config.github_api_url()?,
        config.request_timeout(),
    )
    .context("failed to create GitHub client")?;

    let (sender, receiver) = unbounded_channel();

    let inviter = Inviter::new(
        Arc::new(github),
        config.repo_config_path.clone(),
        config.event_timeout(),
    );
    tokio::spawn(async move { inviter.run(receiver).await });

    let rocket = webhooks::server(config.github_secret, sender);
    rocket
        .launch()
        .await
        .map(drop)
        .map_err(|err| anyhow!("server failed: {}", err))
}
