/// File name used when the caller does not pick one.
pub const DEFAULT_INVITE_FILENAME: &str = "meeting_invite.ics";

/// Suffix appended to the timestamp part of every generated UID.
pub const DEFAULT_UID_DOMAIN: &str = "invite.local";

pub const PRODID: &str = "-//invite//Meeting Scheduler//EN";

/// How long before the start the display alarm fires.
pub const REMINDER_MINUTES: i64 = 10;

/// Submission endpoint of a well-known public mail provider.
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 587;

pub const ICS_CONTENT_TYPE: &str = "text/calendar; method=REQUEST; charset=UTF-8";

/// Compact UTC basic format used for every date-time in the document.
pub const ICS_UTC_FORMAT: &str = "%Y%m%dT%H%M%SZ";
