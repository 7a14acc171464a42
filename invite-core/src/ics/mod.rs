//! ICS invite generation and inspection.
//!
//! Invites are written according to RFC 5545 with `METHOD:REQUEST`, so mail
//! clients offer accept/decline buttons for them.

mod generate;
mod parse;

pub use generate::{GeneratedInvite, generate_ics, generate_invite};
pub use parse::{InviteSummary, invite_uid, read_invite_summary};
