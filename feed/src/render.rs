//! Feed line rendering
//!
//! Turns event records into display lines, newest first. Timestamps
//! render like "1st April 2024 - 9:30 PM UTC".

use chrono::{DateTime, Datelike, Timelike, Utc};

use crate::event::{EventAction, EventRecord};

/// Ordinal suffix for a day of month
///
/// The teens all take "th" (11th, 12th, 13th); outside 4..=20 the last
/// digit decides (1st, 2nd, 3rd, 21st, 22nd, 23rd, 31st).
fn ordinal_suffix(day: u32) -> &'static str {
    if day > 3 && day < 21 {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// Format an instant in UTC with a 12-hour clock
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    let day = timestamp.day();
    let mut hour = timestamp.hour() % 12;
    if hour == 0 {
        hour = 12;
    }
    let meridiem = if timestamp.hour() < 12 { "AM" } else { "PM" };

    format!(
        "{}{} {} {} - {}:{:02} {} UTC",
        day,
        ordinal_suffix(day),
        timestamp.format("%B"),
        timestamp.year(),
        hour,
        timestamp.minute(),
        meridiem
    )
}

/// Render a single event record as a feed line
pub fn render_line(event: &EventRecord) -> String {
    let ts = format_timestamp(&event.timestamp);
    let from = event.from_branch.as_deref().unwrap_or("");

    match event.action {
        EventAction::Push => format!(
            "\"{}\" pushed to \"{}\" on {}",
            event.author, event.to_branch, ts
        ),
        EventAction::PullRequest => format!(
            "\"{}\" submitted a pull request from \"{}\" to \"{}\" on {}",
            event.author, from, event.to_branch, ts
        ),
        EventAction::Merge => format!(
            "\"{}\" merged branch \"{}\" to \"{}\" on {}",
            event.author, from, event.to_branch, ts
        ),
        EventAction::Unknown => "Unknown event type".to_string(),
    }
}

/// Render the whole feed, newest events first
///
/// The sort is stable, so records sharing a timestamp keep their
/// listing order.
pub fn render_lines(mut events: Vec<EventRecord>) -> Vec<String> {
    events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    events.iter().map(render_line).collect()
}
