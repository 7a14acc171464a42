use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use invite_core::ics::{invite_uid, read_invite_summary};
use owo_colors::OwoColorize;

pub fn run(path: &Path) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read invite at {}", path.display()))?;

    let Some(summary) = read_invite_summary(&content) else {
        match invite_uid(&content) {
            Some(uid) => anyhow::bail!(
                "Event {} in {} could not be parsed",
                uid,
                path.display()
            ),
            None => anyhow::bail!("{} does not contain a calendar event", path.display()),
        }
    };

    let when = match (summary.start, summary.end) {
        (Some(start), Some(end)) => format_when(start, end),
        _ => "(no time)".to_string(),
    };

    println!("{}", summary.subject.bold());
    println!("  When:      {}", when);
    if let Some(location) = summary.location.filter(|l| !l.is_empty()) {
        println!("  Where:     {}", location);
    }
    if let Some(organizer) = summary.organizer {
        println!("  Organizer: {}", organizer);
    }
    for attendee in &summary.attendees {
        println!("  Attendee:  {}", attendee);
    }
    println!("  Method:    {}", summary.method.as_deref().unwrap_or("(none)").dimmed());
    println!("  UID:       {}", summary.uid.dimmed());

    Ok(())
}

/// "2025-05-20 14:00 - 15:00 UTC", repeating the date only when the end falls on another day.
fn format_when(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    let end_format = if start.date_naive() == end.date_naive() {
        "%H:%M"
    } else {
        "%Y-%m-%d %H:%M"
    };
    format!(
        "{} - {} UTC",
        start.format("%Y-%m-%d %H:%M"),
        end.format(end_format)
    )
}
