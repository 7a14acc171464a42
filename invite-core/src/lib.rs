//! Meeting invites: build an iCalendar invite, save it, email it.
//!
//! - `ics` renders a `MeetingInvite` as an RFC 5545 document
//! - `writer` saves it to disk
//! - `mailer` sends it as a `text/calendar` attachment over SMTP
//! - `schedule` runs all three in order

pub mod config;
pub mod constants;
pub mod datetime;
pub mod error;
pub mod ics;
pub mod mailer;
pub mod meeting;
pub mod schedule;
pub mod writer;

pub use error::{FailureKind, InviteError, InviteResult};
pub use meeting::{InviteOptions, InviteRequest, MeetingInvite, Participant, TimeOrder};
pub use schedule::{Delivery, schedule_meeting};
