//! Feed polling loop
//!
//! One fetch-and-render pass per tick. Ticks run sequentially, so a
//! slow response can never overwrite a newer render; a tick that
//! overruns the interval skips the missed ticks instead of bursting.

use std::io;
use std::time::Duration;

use async_trait::async_trait;

use crate::client::FeedError;
use crate::event::EventRecord;
use crate::render::render_lines;
use crate::surface::FeedSurface;

/// How often the feed refreshes
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(15);

/// Shown instead of the feed when a fetch or parse fails
pub const FAILURE_MESSAGE: &str = "Failed to load events.";

/// Where event records come from
#[async_trait]
pub trait EventSource {
    async fn fetch_events(&self) -> Result<Vec<EventRecord>, FeedError>;
}

/// Run a single fetch-and-render pass
///
/// Any fetch or parse failure collapses into the fixed failure line;
/// the next tick is the only retry.
pub async fn run_tick<S, F>(source: &S, surface: &mut F) -> io::Result<()>
where
    S: EventSource,
    F: FeedSurface,
{
    match source.fetch_events().await {
        Ok(events) => surface.replace(&render_lines(events)),
        Err(err) => {
            tracing::error!(error = %err, "Failed to fetch events");
            surface.replace(&[FAILURE_MESSAGE.to_string()])
        }
    }
}

/// Poll the source forever, re-rendering the surface on every tick
///
/// The first tick fires immediately.
pub async fn run_feed<S, F>(source: &S, surface: &mut F) -> io::Result<()>
where
    S: EventSource,
    F: FeedSurface,
{
    let mut interval = tokio::time::interval(REFRESH_INTERVAL);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        interval.tick().await;
        run_tick(source, surface).await?;
    }
}
