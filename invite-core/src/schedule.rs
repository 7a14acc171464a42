//! The full invite flow: generate the .ics, save it, email it.

use std::fmt::Display;
use std::path::PathBuf;

use lettre::Transport;
use tracing::{error, info, info_span};

use crate::error::InviteResult;
use crate::ics::generate_invite;
use crate::mailer::{InviteEmail, Mailer, invite_body};
use crate::meeting::{InviteOptions, InviteRequest};
use crate::writer::{InviteTarget, save_invite};

/// What was sent, and where the invite file lives.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub uid: String,
    pub path: PathBuf,
    pub recipients: usize,
}

/// Generate, save and send an invite, stopping at the first failing step.
///
/// The attendees double as the email recipients.
pub fn schedule_meeting<T>(
    request: &InviteRequest,
    options: &InviteOptions,
    target: &InviteTarget,
    mailer: &Mailer<T>,
) -> InviteResult<Delivery>
where
    T: Transport,
    T::Error: Display,
{
    let _span = info_span!("schedule_meeting", subject = %request.subject).entered();

    run_steps(request, options, target, mailer)
        .inspect(|delivery| {
            info!(
                uid = %delivery.uid,
                path = %delivery.path.display(),
                recipients = delivery.recipients,
                "Meeting invite sent"
            );
        })
        .inspect_err(|e| error!(kind = ?e.kind(), "Failed to send meeting invite: {e}"))
}

fn run_steps<T>(
    request: &InviteRequest,
    options: &InviteOptions,
    target: &InviteTarget,
    mailer: &Mailer<T>,
) -> InviteResult<Delivery>
where
    T: Transport,
    T::Error: Display,
{
    let generated = generate_invite(request, options)?;
    let path = save_invite(&generated.content, &target.path())?;

    let email = InviteEmail {
        recipients: request.attendees.clone(),
        subject: request.subject.clone(),
        body: invite_body(&request.description),
        attachment: path.clone(),
    };
    mailer.send(&email)?;

    Ok(Delivery {
        uid: generated.uid,
        path,
        recipients: email.recipients.len(),
    })
}
