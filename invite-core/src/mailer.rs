//! Emailing invites as `text/calendar` attachments.
//!
//! `Mailer` is generic over `lettre::Transport`; production code uses an SMTP
//! relay with STARTTLS, tests use lettre's stub transport.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::{debug, error, info};

use crate::constants::{DEFAULT_SMTP_HOST, DEFAULT_SMTP_PORT, ICS_CONTENT_TYPE};
use crate::error::{InviteError, InviteResult};
use crate::writer::read_invite;

/// Mail relay endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelaySettings {
    pub host: String,
    pub port: u16,
}

impl Default for RelaySettings {
    fn default() -> Self {
        RelaySettings {
            host: DEFAULT_SMTP_HOST.to_string(),
            port: DEFAULT_SMTP_PORT,
        }
    }
}

/// One outgoing email carrying an invite file.
#[derive(Debug, Clone)]
pub struct InviteEmail {
    pub recipients: Vec<String>,
    pub subject: String,
    pub body: String,
    pub attachment: PathBuf,
}

/// Plain-text body sent alongside the invite
pub fn invite_body(description: &str) -> String {
    format!("Hi,\n\nPlease find the meeting invite attached.\n\n{}", description)
}

pub struct Mailer<T> {
    transport: T,
    sender: Mailbox,
}

impl Mailer<SmtpTransport> {
    /// SMTP mailer that upgrades to TLS with STARTTLS and logs in as `sender`.
    ///
    /// No connection is opened until the first message is sent.
    pub fn smtp(relay: &RelaySettings, sender: &str, password: &str) -> InviteResult<Self> {
        let transport = SmtpTransport::starttls_relay(&relay.host)
            .map_err(|e| InviteError::Transport(e.to_string()))?
            .port(relay.port)
            .credentials(Credentials::new(sender.to_string(), password.to_string()))
            .build();

        debug!(host = %relay.host, port = relay.port, "Configured SMTP relay");
        Self::new(transport, sender)
    }
}

impl<T> Mailer<T>
where
    T: Transport,
    T::Error: Display,
{
    pub fn new(transport: T, sender: &str) -> InviteResult<Self> {
        Ok(Mailer {
            transport,
            sender: parse_mailbox(sender)?,
        })
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the MIME message: a plain-text part plus the invite file.
    pub fn compose(&self, email: &InviteEmail) -> InviteResult<Message> {
        if email.recipients.is_empty() {
            return Err(InviteError::Validation("no recipients to send the invite to".into()));
        }

        let mut builder = Message::builder()
            .from(self.sender.clone())
            .subject(email.subject.clone());
        for recipient in &email.recipients {
            builder = builder.to(parse_mailbox(recipient)?);
        }

        let content_type =
            ContentType::parse(ICS_CONTENT_TYPE).map_err(|e| InviteError::Message(e.to_string()))?;
        let attachment = Attachment::new(attachment_name(&email.attachment))
            .body(read_invite(&email.attachment)?, content_type);

        builder
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::plain(email.body.clone()))
                    .singlepart(attachment),
            )
            .map_err(|e| InviteError::Message(e.to_string()))
    }

    /// Compose and submit `email` to every recipient. No retries.
    pub fn send(&self, email: &InviteEmail) -> InviteResult<()> {
        let message = self
            .compose(email)
            .inspect_err(|e| error!("Error sending email: {e}"))?;

        self.transport.send(&message).map_err(|e| {
            error!(recipients = email.recipients.len(), "Error sending email: {e}");
            InviteError::Transport(e.to_string())
        })?;

        info!(
            recipients = email.recipients.len(),
            subject = %email.subject,
            "Email sent successfully"
        );
        Ok(())
    }
}

fn parse_mailbox(address: &str) -> InviteResult<Mailbox> {
    address.trim().parse().map_err(|e: lettre::address::AddressError| {
        InviteError::Address {
            address: address.to_string(),
            reason: e.to_string(),
        }
    })
}

fn attachment_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| crate::constants::DEFAULT_INVITE_FILENAME.to_string())
}
