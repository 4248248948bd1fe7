use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::datetime::{event_at_serde, local_to_utc, parse_time_of_day};

pub const DEFAULT_OCCASION: &str = "XV Años";

fn default_occasion() -> String {
    DEFAULT_OCCASION.to_string()
}

/// One invitation as authored in the data file. Immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvitationRecord {
    pub id: String,

    pub name: String,

    /// Local wall-clock time of the event in the site timezone.
    #[serde(with = "event_at_serde")]
    pub event_at: NaiveDateTime,

    #[serde(default = "default_occasion")]
    pub occasion: String,

    #[serde(default)]
    pub parents: Vec<String>,

    #[serde(default)]
    pub phrase: Option<String>,

    #[serde(default)]
    pub ceremony: Option<Venue>,

    #[serde(default)]
    pub reception: Option<Venue>,

    #[serde(default)]
    pub timeline: Vec<TimelineEntry>,

    #[serde(default)]
    pub hashtag: Option<String>,

    #[serde(default)]
    pub dress_code: Option<String>,

    /// `Some(vec![])` still shows the registry section (envelope only).
    #[serde(default)]
    pub registries: Option<Vec<Registry>>,

    #[serde(default)]
    pub escorts: Option<Vec<Person>>,

    #[serde(default)]
    pub rsvp_link: Option<String>,

    #[serde(default)]
    pub music: Option<String>,

    #[serde(default)]
    pub contact: Option<Contact>,

    #[serde(default)]
    pub bank_transfer: Option<BankTransfer>,

    #[serde(default)]
    pub customization: Customization,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Venue {
    pub address: String,
    /// Opaque short-link reference of the place on the map provider.
    pub place_ref: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VenueKind {
    Ceremony,
    Reception,
}

impl VenueKind {
    pub fn label(self) -> &'static str {
        match self {
            VenueKind::Ceremony => "Ceremonia Religiosa",
            VenueKind::Reception => "Recepción y Fiesta",
        }
    }

    fn timeline_slot(self) -> usize {
        match self {
            VenueKind::Ceremony => 0,
            VenueKind::Reception => 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimelineEntry {
    pub time: String,
    pub label: String,
}

impl TimelineEntry {
    pub fn new(time: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            label: label.into(),
        }
    }

    pub fn time_of_day(&self) -> Option<chrono::NaiveTime> {
        parse_time_of_day(&self.time)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Registry {
    pub name: String,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Person {
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contact {
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub whatsapp: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BankTransfer {
    pub bank: String,
    pub clabe: String,
    pub card_number: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Customization {
    #[serde(default)]
    pub header_image: Option<String>,
    #[serde(default)]
    pub countdown_image: Option<String>,
    #[serde(default)]
    pub calendar_image: Option<String>,
    #[serde(default)]
    pub escorts_image: Option<String>,
    #[serde(default)]
    pub location_image: Option<String>,
    #[serde(default)]
    pub timeline_image: Option<String>,
    #[serde(default)]
    pub hashtag_image: Option<String>,
    #[serde(default)]
    pub dress_code_image: Option<String>,
    #[serde(default)]
    pub registry_image: Option<String>,
    #[serde(default)]
    pub gallery_image: Option<String>,
    #[serde(default)]
    pub rsvp_image: Option<String>,
    #[serde(default)]
    pub gallery: Vec<String>,
    #[serde(default)]
    pub highlights: Vec<Highlight>,
}

/// Full-bleed image panel with an optional caption.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Highlight {
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl Highlight {
    pub fn is_empty(&self) -> bool {
        non_blank(self.image.as_deref()).is_none() && non_blank(self.text.as_deref()).is_none()
    }
}

impl InvitationRecord {
    /// Minimal record; the remaining fields start empty.
    pub fn new(id: impl Into<String>, name: impl Into<String>, event_at: NaiveDateTime) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            event_at,
            occasion: default_occasion(),
            parents: vec![],
            phrase: None,
            ceremony: None,
            reception: None,
            timeline: vec![],
            hashtag: None,
            dress_code: None,
            registries: None,
            escorts: None,
            rsvp_link: None,
            music: None,
            contact: None,
            bank_transfer: None,
            customization: Customization::default(),
        }
    }

    pub fn event_instant(&self, tz: &Tz) -> DateTime<Utc> {
        local_to_utc(tz, self.event_at)
    }

    pub fn venue(&self, kind: VenueKind) -> Option<&Venue> {
        match kind {
            VenueKind::Ceremony => self.ceremony.as_ref(),
            VenueKind::Reception => self.reception.as_ref(),
        }
    }

    /// The venue's own time, else the timeline entry in the venue's slot.
    pub fn venue_time(&self, kind: VenueKind) -> Option<&str> {
        let venue = self.venue(kind)?;
        non_blank(venue.time.as_deref())
            .or_else(|| self.timeline.get(kind.timeline_slot()).map(|e| e.time.as_str()))
    }

    /// Address used by calendar exports: reception first, then ceremony.
    pub fn event_location(&self) -> &str {
        self.reception
            .as_ref()
            .or(self.ceremony.as_ref())
            .map(|venue| venue.address.as_str())
            .unwrap_or("")
    }

    pub fn hashtag(&self) -> Option<&str> {
        non_blank(self.hashtag.as_deref())
    }

    pub fn dress_code(&self) -> Option<&str> {
        non_blank(self.dress_code.as_deref())
    }

    pub fn music(&self) -> Option<&str> {
        non_blank(self.music.as_deref())
    }

    /// Highlight panel `n` (1-based), if authored with any content.
    pub fn highlight(&self, n: usize) -> Option<&Highlight> {
        n.checked_sub(1)
            .and_then(|idx| self.customization.highlights.get(idx))
            .filter(|highlight| !highlight.is_empty())
    }

    pub fn summary_title(&self) -> String {
        format!("{} de {}", self.occasion, self.name)
    }
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn record() -> InvitationRecord {
        let at = NaiveDate::from_ymd_opt(2025, 12, 20)
            .and_then(|d| d.and_hms_opt(17, 0, 0))
            .expect("valid datetime");
        let mut record = InvitationRecord::new("x", "Arely", at);
        record.timeline = vec![
            TimelineEntry::new("17:00", "Misa"),
            TimelineEntry::new("18:15", "Recepción"),
        ];
        record
    }

    #[test]
    fn venue_time_falls_back_to_timeline_slot() {
        let mut record = record();
        record.ceremony = Some(Venue {
            address: "Iglesia".to_string(),
            place_ref: "abc".to_string(),
            image: None,
            time: None,
        });
        record.reception = Some(Venue {
            address: "Salón".to_string(),
            place_ref: "def".to_string(),
            image: None,
            time: Some("20:00".to_string()),
        });

        assert_eq!(record.venue_time(VenueKind::Ceremony), Some("17:00"));
        assert_eq!(record.venue_time(VenueKind::Reception), Some("20:00"));
        assert_eq!(record.event_location(), "Salón");
    }

    #[test]
    fn blank_optional_text_counts_as_absent() {
        let mut record = record();
        record.hashtag = Some("   ".to_string());
        record.customization.highlights = vec![
            Highlight::default(),
            Highlight {
                image: None,
                text: Some("Salmo 17:8".to_string()),
            },
        ];

        assert_eq!(record.hashtag(), None);
        assert!(record.highlight(1).is_none());
        assert!(record.highlight(2).is_some());
        assert!(record.highlight(0).is_none());
        assert_eq!(record.event_location(), "");
    }

    #[test]
    fn summary_title_uses_occasion() {
        assert_eq!(record().summary_title(), "XV Años de Arely");
    }
}
