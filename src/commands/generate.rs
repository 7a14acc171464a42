use std::path::PathBuf;

use anyhow::Result;
use invite_core::config::InviteConfig;
use invite_core::ics::generate_invite;
use invite_core::writer::save_invite;
use owo_colors::OwoColorize;

use crate::MeetingArgs;

pub fn run(meeting: MeetingArgs, output: Option<PathBuf>) -> Result<()> {
    let cfg = InviteConfig::load()?;
    let request = meeting.into_request()?;

    let generated = generate_invite(&request, &cfg.invite_options())?;
    let path = save_invite(&generated.content, &super::invite_target(&cfg, output).path())?;

    println!("{}", format!("  Created: {}", request.subject).green());
    println!("  UID:     {}", generated.uid);
    println!("  File:    {}", path.display());

    Ok(())
}
