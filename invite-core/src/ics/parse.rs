//! Reading back saved invites, using the icalendar crate's parser.

use chrono::{DateTime, NaiveDateTime, Utc};
use icalendar::parser::{read_calendar, unfold};

use crate::constants::ICS_UTC_FORMAT;

/// The parts of a saved invite worth showing to a user.
#[derive(Debug, Clone, PartialEq)]
pub struct InviteSummary {
    pub uid: String,
    pub method: Option<String>,
    pub subject: String,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub organizer: Option<String>,
    pub attendees: Vec<String>,
}

/// Parse ICS content into an InviteSummary. `None` if there is no VEVENT with a UID.
pub fn read_invite_summary(content: &str) -> Option<InviteSummary> {
    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded).ok()?;

    let method = calendar
        .properties
        .iter()
        .find(|p| p.name == "METHOD")
        .map(|p| p.val.to_string());

    let vevent = calendar.components.iter().find(|c| c.name == "VEVENT")?;

    let uid = vevent.find_prop("UID")?.val.to_string();
    let subject = vevent
        .find_prop("SUMMARY")
        .map(|p| p.val.to_string())
        .unwrap_or_default();
    let start = vevent.find_prop("DTSTART").and_then(|p| parse_utc(p.val.as_ref()));
    let end = vevent.find_prop("DTEND").and_then(|p| parse_utc(p.val.as_ref()));
    let location = vevent.find_prop("LOCATION").map(|p| p.val.to_string());
    let organizer = vevent
        .find_prop("ORGANIZER")
        .map(|p| strip_mailto(p.val.as_ref()));

    let attendees = vevent
        .properties
        .iter()
        .filter(|p| p.name == "ATTENDEE")
        .map(|p| strip_mailto(p.val.as_ref()))
        .collect();

    Some(InviteSummary {
        uid,
        method,
        subject,
        start,
        end,
        location,
        organizer,
        attendees,
    })
}

/// Get the UID of the event in an .ics document
pub fn invite_uid(content: &str) -> Option<String> {
    content
        .lines()
        .find_map(|line| line.strip_prefix("UID:"))
        .map(|uid| uid.trim().to_string())
}

fn parse_utc(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, ICS_UTC_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

fn strip_mailto(value: &str) -> String {
    value
        .strip_prefix("mailto:")
        .or_else(|| value.strip_prefix("MAILTO:"))
        .unwrap_or(value)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ics::generate_ics;
    use crate::meeting::{MeetingInvite, Participant};
    use chrono::TimeZone;

    fn make_test_invite() -> MeetingInvite {
        MeetingInvite {
            uid: "42.000001@invite.local".to_string(),
            organizer: Participant::new("boss@example.com"),
            attendees: vec!["a@example.com".to_string(), "b@example.com".to_string()],
            start: Utc.with_ymd_and_hms(2025, 5, 20, 14, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2025, 5, 20, 15, 0, 0).unwrap(),
            subject: "Sync".to_string(),
            location: "Room 1".to_string(),
            description: "Agenda".to_string(),
            stamp: Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap(),
            sequence: 0,
        }
    }

    #[test]
    fn test_generated_invite_reads_back() {
        let invite = make_test_invite();
        let ics = generate_ics(&invite).unwrap();

        let summary = read_invite_summary(&ics).expect("generated ICS should parse");

        assert_eq!(summary.uid, invite.uid);
        assert_eq!(summary.method.as_deref(), Some("REQUEST"));
        assert_eq!(summary.subject, "Sync");
        assert_eq!(summary.start, Some(invite.start));
        assert_eq!(summary.end, Some(invite.end));
        assert_eq!(summary.location.as_deref(), Some("Room 1"));
        assert_eq!(summary.organizer.as_deref(), Some("boss@example.com"));
        assert_eq!(summary.attendees, invite.attendees);
    }

    #[test]
    fn test_invite_uid_skips_other_lines() {
        let ics = generate_ics(&make_test_invite()).unwrap();
        assert_eq!(invite_uid(&ics).as_deref(), Some("42.000001@invite.local"));
        assert_eq!(invite_uid("BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n"), None);
    }

    #[test]
    fn test_garbage_is_not_an_invite() {
        assert!(read_invite_summary("hello there").is_none());
    }
}
