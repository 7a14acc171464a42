pub mod config;
pub mod generate;
pub mod send;
pub mod show;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Duration;
use invite_core::InviteRequest;
use invite_core::config::InviteConfig;
use invite_core::datetime::parse_timestamp;
use invite_core::writer::InviteTarget;

use crate::MeetingArgs;

/// Meetings without --end or --duration last this long
const DEFAULT_DURATION_MINUTES: i64 = 60;

impl MeetingArgs {
    pub fn into_request(self) -> Result<InviteRequest> {
        let end = resolve_end(&self.start, self.end, self.duration.as_deref())?;

        Ok(InviteRequest {
            organizer: self.organizer,
            organizer_name: self.organizer_name,
            attendees: self.attendees,
            start: self.start,
            end,
            subject: self.subject,
            location: self.location,
            description: self.description,
        })
    }
}

/// Pick the end time from --end, --duration, or the default length.
///
/// An explicit --end is passed through untouched so that bad input surfaces as
/// the library's own parse error.
fn resolve_end(start: &str, end: Option<String>, duration: Option<&str>) -> Result<String> {
    if let Some(end) = end {
        return Ok(end);
    }

    let length = match duration {
        Some(input) => {
            let std_dur = humantime::parse_duration(input)
                .with_context(|| format!("Could not parse duration: \"{}\"", input))?;
            Duration::from_std(std_dur).context("Duration too large")?
        }
        None => Duration::minutes(DEFAULT_DURATION_MINUTES),
    };

    let start_time = parse_timestamp(start)?;
    let Some(end_time) = start_time.checked_add_signed(length) else {
        anyhow::bail!("Meeting end is out of range: {} plus {:?}", start, duration);
    };
    Ok(end_time.to_rfc3339())
}

pub fn invite_target(cfg: &InviteConfig, output: Option<PathBuf>) -> InviteTarget {
    InviteTarget {
        dir: cfg.output_dir(),
        filename: output,
    }
}
