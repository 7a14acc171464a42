//! ICS invite generation.

use chrono::Utc;
use icalendar::{Alarm, Calendar, Component, EventLike, Property, Trigger};
use tracing::{debug, error, info};

use crate::constants::{ICS_UTC_FORMAT, PRODID, REMINDER_MINUTES};
use crate::error::InviteResult;
use crate::meeting::{InviteOptions, InviteRequest, MeetingInvite};

/// Serialised invite plus the UID it was stamped with.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedInvite {
    pub uid: String,
    pub content: String,
}

/// Validate a request and render it as an ICS document.
pub fn generate_invite(
    request: &InviteRequest,
    options: &InviteOptions,
) -> InviteResult<GeneratedInvite> {
    let invite = MeetingInvite::from_request(request, options, Utc::now()).inspect_err(|e| {
        error!(subject = %request.subject, "Error creating .ics content: {e}");
    })?;

    let content = generate_ics(&invite)?;
    info!(
        uid = %invite.uid,
        attendees = invite.attendees.len(),
        "Generated meeting invite"
    );

    Ok(GeneratedInvite {
        uid: invite.uid,
        content,
    })
}

/// Generate .ics content for a single meeting
pub fn generate_ics(invite: &MeetingInvite) -> InviteResult<String> {
    let mut cal = Calendar::new();

    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&invite.uid);
    ics_event.summary(&invite.subject);

    ics_event.add_property("DTSTAMP", invite.stamp.format(ICS_UTC_FORMAT).to_string());
    ics_event.add_property("DTSTART", invite.start.format(ICS_UTC_FORMAT).to_string());
    ics_event.add_property("DTEND", invite.end.format(ICS_UTC_FORMAT).to_string());

    // Always present, even when empty
    ics_event.location(&invite.location);
    ics_event.description(&invite.description);

    ics_event.add_property("STATUS", "CONFIRMED");
    ics_event.add_property("SEQUENCE", invite.sequence.to_string());

    // ORGANIZER
    let mut organizer = Property::new("ORGANIZER", format!("mailto:{}", invite.organizer.email));
    organizer.add_parameter("CN", invite.organizer.name.as_deref().unwrap_or("Organizer"));
    ics_event.append_property(organizer);

    // ATTENDEE (multi-property), address doubles as display name.
    // Lines past 75 octets come out folded.
    for email in &invite.attendees {
        let mut prop = Property::new("ATTENDEE", format!("mailto:{}", email));
        prop.add_parameter("CN", email);
        ics_event.append_multi_property(prop);
    }

    let trigger = Trigger::before_start(chrono::Duration::minutes(REMINDER_MINUTES));
    ics_event.alarm(Alarm::display("Reminder", trigger));

    let ics_event = ics_event.done();
    cal.push(ics_event);
    let cal = cal.done();

    let output = finish_ics(&cal.to_string());
    debug!(uid = %invite.uid, bytes = output.len(), "Serialised invite");

    Ok(output)
}

/// Post-process the icalendar crate's output
/// - Replace PRODID with ours
/// - Add METHOD:REQUEST to the calendar header
/// - Remove DTSTAMP and UID inside VALARM sections (not required by RFC 5545)
fn finish_ics(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len() + 32);
    let mut in_valarm = false;
    let mut method_written = false;

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:");
            result.push_str(PRODID);
            result.push_str("\r\n");
            continue;
        }

        if line.starts_with("METHOD:") {
            continue;
        }

        // Calendar properties precede the first component
        if line == "BEGIN:VEVENT" && !method_written {
            result.push_str("METHOD:REQUEST\r\n");
            method_written = true;
        }

        if line == "BEGIN:VALARM" {
            in_valarm = true;
        } else if line == "END:VALARM" {
            in_valarm = false;
        }

        if in_valarm && (line.starts_with("DTSTAMP:") || line.starts_with("UID:")) {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}
