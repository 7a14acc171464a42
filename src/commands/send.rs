use std::path::PathBuf;

use anyhow::{Context, Result};
use invite_core::config::InviteConfig;
use invite_core::mailer::Mailer;
use invite_core::schedule_meeting;
use owo_colors::OwoColorize;
use tracing::debug;

use crate::MeetingArgs;

/// Command-line values that take precedence over the [smtp] config table.
pub struct RelayOverrides {
    pub sender: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

pub fn run(meeting: MeetingArgs, output: Option<PathBuf>, overrides: RelayOverrides) -> Result<()> {
    let cfg = InviteConfig::load()?;
    let request = meeting.into_request()?;

    let mut relay = cfg.smtp.relay();
    if let Some(host) = overrides.host {
        relay.host = host;
    }
    if let Some(port) = overrides.port {
        relay.port = port;
    }

    let sender = overrides
        .sender
        .or_else(|| cfg.smtp.sender.clone())
        .unwrap_or_else(|| request.organizer.clone());
    debug!(host = %relay.host, port = relay.port, sender = %sender, "Resolved mail relay");

    let password = match cfg.smtp.password.clone() {
        Some(password) => password,
        None => rpassword::prompt_password(format!("  SMTP password for {}: ", sender))
            .context("Could not read password")?,
    };

    let mailer = Mailer::smtp(&relay, &sender, &password)?;
    let target = super::invite_target(&cfg, output);

    let delivery = schedule_meeting(&request, &cfg.invite_options(), &target, &mailer)
        .with_context(|| format!("Failed to send meeting invite \"{}\"", request.subject))?;

    println!(
        "{}",
        format!(
            "  Sent: {} ({} recipient{})",
            request.subject,
            delivery.recipients,
            if delivery.recipients == 1 { "" } else { "s" }
        )
        .green()
    );
    println!("  UID:  {}", delivery.uid);
    println!("  File: {}", delivery.path.display());

    Ok(())
}
