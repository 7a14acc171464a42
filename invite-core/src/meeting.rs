//! Meeting invite types.
//!
//! `InviteRequest` is what a caller hands in (raw strings). `MeetingInvite` is
//! the validated, UTC-normalised form that the ICS generator serialises.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::DEFAULT_UID_DOMAIN;
use crate::datetime::parse_timestamp;
use crate::error::{InviteError, InviteResult};

/// Whether an end time at or before the start time is accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOrder {
    /// Reject `end <= start`.
    #[default]
    Strict,
    /// Accept any ordering; inverted ranges are only logged.
    Permissive,
}

/// Knobs that shape a generated invite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteOptions {
    pub uid_domain: String,
    pub time_order: TimeOrder,
}

impl Default for InviteOptions {
    fn default() -> Self {
        InviteOptions {
            uid_domain: DEFAULT_UID_DOMAIN.to_string(),
            time_order: TimeOrder::default(),
        }
    }
}

/// Meeting organizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub email: String,
    /// Display name; the ORGANIZER line falls back to "Organizer"
    pub name: Option<String>,
}

impl Participant {
    pub fn new(email: impl Into<String>) -> Self {
        Participant {
            email: email.into(),
            name: None,
        }
    }
}

/// Raw scheduling input, as received from a caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InviteRequest {
    pub organizer: String,
    /// Shown as the organizer's CN; "Organizer" when unset
    #[serde(default)]
    pub organizer_name: Option<String>,
    pub attendees: Vec<String>,
    /// Start time, e.g. "2025-05-20T14:00:00"
    pub start: String,
    /// End time, e.g. "2025-05-20T15:00:00"
    pub end: String,
    pub subject: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
}

/// A single-event invite ready to be serialised.
#[derive(Debug, Clone, PartialEq)]
pub struct MeetingInvite {
    pub uid: String,
    pub organizer: Participant,
    pub attendees: Vec<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub subject: String,
    pub location: String,
    pub description: String,
    /// DTSTAMP
    pub stamp: DateTime<Utc>,
    /// Always 0: invites are never updated or cancelled.
    pub sequence: u32,
}

impl MeetingInvite {
    /// Validate a request and turn it into an invite stamped at `now`.
    pub fn from_request(
        request: &InviteRequest,
        options: &InviteOptions,
        now: DateTime<Utc>,
    ) -> InviteResult<Self> {
        if request.organizer.trim().is_empty() {
            return Err(InviteError::Validation("organizer address is empty".into()));
        }
        if request.attendees.iter().any(|a| a.trim().is_empty()) {
            return Err(InviteError::Validation("attendee address is empty".into()));
        }

        let start = parse_timestamp(&request.start)?;
        let end = parse_timestamp(&request.end)?;

        if end <= start {
            match options.time_order {
                TimeOrder::Strict => {
                    return Err(InviteError::Validation(format!(
                        "end time {} is not after start time {}",
                        request.end, request.start
                    )));
                }
                TimeOrder::Permissive => {
                    warn!(start = %start, end = %end, "Meeting ends before it starts");
                }
            }
        }

        Ok(MeetingInvite {
            uid: generate_uid(now, &options.uid_domain),
            organizer: Participant {
                email: request.organizer.trim().to_string(),
                name: request
                    .organizer_name
                    .as_deref()
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string),
            },
            attendees: request.attendees.iter().map(|a| a.trim().to_string()).collect(),
            start,
            end,
            subject: request.subject.clone(),
            location: request.location.clone(),
            description: request.description.clone(),
            stamp: now,
            sequence: 0,
        })
    }
}

/// Timestamp-derived UID, e.g. `1747749600.123456@invite.local`.
pub fn generate_uid(now: DateTime<Utc>, domain: &str) -> String {
    format!(
        "{}.{:06}@{}",
        now.timestamp(),
        now.timestamp_subsec_micros(),
        domain
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_request() -> InviteRequest {
        InviteRequest {
            organizer: "boss@example.com".to_string(),
            organizer_name: None,
            attendees: vec!["a@example.com".to_string(), "b@example.com".to_string()],
            start: "2025-05-20T14:00:00".to_string(),
            end: "2025-05-20T15:00:00".to_string(),
            subject: "Sync".to_string(),
            location: "Room 1".to_string(),
            description: String::new(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_from_request_normalises_times() {
        let invite =
            MeetingInvite::from_request(&make_request(), &InviteOptions::default(), now()).unwrap();

        assert_eq!(invite.start, Utc.with_ymd_and_hms(2025, 5, 20, 14, 0, 0).unwrap());
        assert_eq!(invite.end, Utc.with_ymd_and_hms(2025, 5, 20, 15, 0, 0).unwrap());
        assert_eq!(invite.sequence, 0);
        assert_eq!(invite.stamp, now());
        assert_eq!(invite.attendees.len(), 2);
    }

    #[test]
    fn test_organizer_name_is_carried_over() {
        let mut request = make_request();
        request.organizer_name = Some(" Pat Lee ".to_string());

        let invite =
            MeetingInvite::from_request(&request, &InviteOptions::default(), now()).unwrap();
        assert_eq!(invite.organizer.name.as_deref(), Some("Pat Lee"));

        request.organizer_name = Some("   ".to_string());
        let invite =
            MeetingInvite::from_request(&request, &InviteOptions::default(), now()).unwrap();
        assert_eq!(invite.organizer.name, None);
    }

    #[test]
    fn test_uid_combines_time_and_domain() {
        let uid = generate_uid(now(), "example.test");
        assert_eq!(uid, format!("{}.000000@example.test", now().timestamp()));
    }

    #[test]
    fn test_strict_rejects_inverted_range() {
        let mut request = make_request();
        request.end = "2025-05-20T13:00:00".to_string();

        let err = MeetingInvite::from_request(&request, &InviteOptions::default(), now())
            .unwrap_err();
        assert!(matches!(err, InviteError::Validation(_)), "got {:?}", err);
    }

    #[test]
    fn test_strict_rejects_zero_length_meeting() {
        let mut request = make_request();
        request.end = request.start.clone();

        assert!(MeetingInvite::from_request(&request, &InviteOptions::default(), now()).is_err());
    }

    #[test]
    fn test_permissive_accepts_inverted_range() {
        let mut request = make_request();
        request.end = "2025-05-20T13:00:00".to_string();
        let options = InviteOptions {
            time_order: TimeOrder::Permissive,
            ..InviteOptions::default()
        };

        let invite = MeetingInvite::from_request(&request, &options, now()).unwrap();
        assert!(invite.end < invite.start);
    }

    #[test]
    fn test_blank_organizer_is_rejected() {
        let mut request = make_request();
        request.organizer = "  ".to_string();

        let err = MeetingInvite::from_request(&request, &InviteOptions::default(), now())
            .unwrap_err();
        assert!(matches!(err, InviteError::Validation(_)));
    }

    #[test]
    fn test_bad_start_is_parse_error() {
        let mut request = make_request();
        request.start = "not-a-date".to_string();

        let err = MeetingInvite::from_request(&request, &InviteOptions::default(), now())
            .unwrap_err();
        assert!(matches!(err, InviteError::Parse { .. }));
    }
}
