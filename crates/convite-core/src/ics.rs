//! Calendar-file export of one invitation.

use chrono::{DateTime, Utc};
use icalendar::{Calendar, Component, Event, EventLike};

use crate::links::{event_description, event_window};
use crate::record::InvitationRecord;

pub const ICS_MIME: &str = "text/calendar;charset=utf-8";

/// Builds the VCALENDAR text for `record`, starting at `start` and
/// stamped with `now`.
#[tracing::instrument(skip(record), fields(id = %record.id))]
pub fn calendar_file(record: &InvitationRecord, start: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let (start, end) = event_window(start);

    let event = Event::new()
        .uid(&event_uid(record, start))
        .timestamp(now)
        .summary(&record.summary_title())
        .starts(start)
        .ends(end)
        .location(record.event_location())
        .description(&event_description(record))
        .done();

    let mut calendar = Calendar::new();
    calendar.push(event);
    calendar.done().to_string()
}

pub fn event_uid(record: &InvitationRecord, start: DateTime<Utc>) -> String {
    format!("{}-{}@convite", record.id, start.format("%Y%m%dT%H%M%SZ"))
}

/// `XV_Sofía_Valentina.ics` for a "XV Años" invitation.
pub fn calendar_filename(record: &InvitationRecord) -> String {
    let prefix = record
        .occasion
        .split_whitespace()
        .next()
        .unwrap_or("Evento");
    let name = record.name.split_whitespace().collect::<Vec<_>>().join("_");
    format!("{prefix}_{name}.ics")
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone};

    use super::*;
    use crate::record::Venue;

    fn record() -> InvitationRecord {
        let at = NaiveDate::from_ymd_opt(2026, 3, 14)
            .and_then(|d| d.and_hms_opt(18, 30, 0))
            .expect("valid datetime");
        let mut record = InvitationRecord::new("Sofia-Demo", "Sofía  Valentina", at);
        record.ceremony = Some(Venue {
            address: "Parroquia San José".to_string(),
            place_ref: "x".to_string(),
            image: None,
            time: None,
        });
        record
    }

    fn at(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 15, h, 30, 0).single().expect("time")
    }

    #[test]
    fn payload_carries_event_fields() {
        let text = calendar_file(&record(), at(0), at(9));
        assert!(text.starts_with("BEGIN:VCALENDAR"));
        assert!(text.contains("BEGIN:VEVENT"));
        assert!(text.contains("UID:Sofia-Demo-20260315T003000Z@convite"));
        assert!(text.contains("DTSTAMP:20260315T093000Z"));
        assert!(text.contains("DTSTART:20260315T003000Z"));
        assert!(text.contains("DTEND:20260315T043000Z"));
        assert!(text.contains("SUMMARY:XV Años de Sofía  Valentina"));
        assert!(text.contains("LOCATION:Parroquia San José"));
        assert!(text.contains("DESCRIPTION:Evento especial de XV Años. ¡No faltes!"));
        assert!(text.trim_end().ends_with("END:VCALENDAR"));
    }

    #[test]
    fn filename_collapses_whitespace() {
        assert_eq!(calendar_filename(&record()), "XV_Sofía_Valentina.ics");
    }
}
