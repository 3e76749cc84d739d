//! GitFeed terminal client
//!
//! Polls the GitFeed API and renders the latest repository activity
//! in the terminal, refreshing in place every few seconds.

mod client;
mod event;
mod poller;
mod render;
mod surface;

use anyhow::Result;
use client::FeedApiClient;
use surface::TerminalSurface;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Log to stderr (stdout is the feed display)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting GitFeed terminal client");

    let client = FeedApiClient::from_env();
    let mut surface = TerminalSurface::new();

    poller::run_feed(&client, &mut surface).await?;

    Ok(())
}
