//! Outbound links: maps, social sharing, calendar deep links, contact.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use urlencoding::encode;

use crate::record::{InvitationRecord, Venue};

pub const MAPS_BASE: &str = "https://maps.app.goo.gl";
pub const EVENT_DURATION_HOURS: i64 = 4;

/// Start and end of the exported calendar event.
pub fn event_window(start: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    (start, start + Duration::hours(EVENT_DURATION_HOURS))
}

pub fn event_description(record: &InvitationRecord) -> String {
    format!("Evento especial de {}. ¡No faltes!", record.occasion)
}

pub fn map_url(venue: &Venue) -> String {
    format!("{MAPS_BASE}/{}", venue.place_ref.trim())
}

pub fn share_text(record: &InvitationRecord) -> String {
    let mut text = format!("¡Celebrando los XV años de {}!", record.name);
    if let Some(hashtag) = record.hashtag() {
        text.push(' ');
        text.push_str(hashtag);
    }
    text
}

pub fn twitter_share_url(record: &InvitationRecord, page_url: &str) -> String {
    format!(
        "https://twitter.com/intent/tweet?text={}&url={}",
        encode(&share_text(record)),
        encode(page_url)
    )
}

fn bare_tag(hashtag: &str) -> &str {
    hashtag.trim().trim_start_matches('#')
}

pub fn instagram_tag_url(hashtag: &str) -> String {
    format!(
        "https://www.instagram.com/explore/tags/{}/",
        encode(bare_tag(hashtag))
    )
}

pub fn tiktok_tag_url(hashtag: &str) -> String {
    format!("https://www.tiktok.com/tag/{}", encode(bare_tag(hashtag)))
}

fn compact_utc(at: DateTime<Utc>) -> String {
    at.format("%Y%m%dT%H%M%SZ").to_string()
}

pub fn google_calendar_url(record: &InvitationRecord, start: DateTime<Utc>) -> String {
    let (start, end) = event_window(start);
    format!(
        "https://calendar.google.com/calendar/render?action=TEMPLATE&text={}&dates={}/{}&details={}&location={}",
        encode(&record.summary_title()),
        compact_utc(start),
        compact_utc(end),
        encode(&event_description(record)),
        encode(record.event_location())
    )
}

pub fn outlook_calendar_url(record: &InvitationRecord, start: DateTime<Utc>) -> String {
    let (start, end) = event_window(start);
    format!(
        "https://outlook.live.com/calendar/0/deeplink/compose?subject={}&body={}&startdt={}&enddt={}&location={}",
        encode(&record.summary_title()),
        encode(&event_description(record)),
        encode(&start.to_rfc3339_opts(SecondsFormat::Secs, true)),
        encode(&end.to_rfc3339_opts(SecondsFormat::Secs, true)),
        encode(record.event_location())
    )
}

fn digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

pub fn whatsapp_url(number: &str, text: &str) -> Option<String> {
    let number = digits(number);
    if number.is_empty() {
        return None;
    }
    Some(format!("https://wa.me/{number}?text={}", encode(text)))
}

pub fn tel_url(number: &str) -> Option<String> {
    let cleaned: String = number
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();
    (!cleaned.is_empty()).then(|| format!("tel:{cleaned}"))
}

/// Resolves a media reference: absolute `http(s)` URLs pass through,
/// anything else is served from under the site's base path.
pub fn asset_url(base_path: &str, reference: &str) -> String {
    let reference = reference.trim();
    if reference.starts_with("http") {
        return reference.to_string();
    }
    let base = crate::route::normalize_base(base_path);
    format!("{base}/{}", reference.trim_start_matches('/'))
}

/// Every outbound link for one invitation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkSet {
    pub ceremony_map: Option<String>,
    pub reception_map: Option<String>,
    pub share_twitter: String,
    pub instagram: Option<String>,
    pub tiktok: Option<String>,
    pub google_calendar: String,
    pub outlook_calendar: String,
    pub rsvp: Option<String>,
    pub whatsapp: Option<String>,
    pub phone: Option<String>,
}

impl LinkSet {
    pub fn build(record: &InvitationRecord, start: DateTime<Utc>, page_url: &str) -> Self {
        let hashtag = record.hashtag();
        let contact = record.contact.as_ref();
        let greeting = format!("Hola, escribo por la invitación de {}", record.name);

        Self {
            ceremony_map: record.ceremony.as_ref().map(map_url),
            reception_map: record.reception.as_ref().map(map_url),
            share_twitter: twitter_share_url(record, page_url),
            instagram: hashtag.map(instagram_tag_url),
            tiktok: hashtag.map(tiktok_tag_url),
            google_calendar: google_calendar_url(record, start),
            outlook_calendar: outlook_calendar_url(record, start),
            rsvp: crate::record::non_blank(record.rsvp_link.as_deref()).map(str::to_string),
            whatsapp: contact
                .and_then(|c| c.whatsapp.as_deref())
                .and_then(|number| whatsapp_url(number, &greeting)),
            phone: contact.and_then(|c| c.phone.as_deref()).and_then(tel_url),
        }
    }

    /// `(label, url)` pairs in display order, skipping absent links.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("Ceremonia (mapa)", self.ceremony_map.as_deref()),
            ("Recepción (mapa)", self.reception_map.as_deref()),
            ("Compartir en X", Some(self.share_twitter.as_str())),
            ("Instagram", self.instagram.as_deref()),
            ("TikTok", self.tiktok.as_deref()),
            ("Google Calendar", Some(self.google_calendar.as_str())),
            ("Outlook", Some(self.outlook_calendar.as_str())),
            ("Confirmar asistencia", self.rsvp.as_deref()),
            ("WhatsApp", self.whatsapp.as_deref()),
            ("Teléfono", self.phone.as_deref()),
        ]
        .into_iter()
        .filter_map(|(label, url)| url.map(|url| (label, url)))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone};

    use super::*;
    use crate::record::Contact;

    fn record() -> InvitationRecord {
        let at = NaiveDate::from_ymd_opt(2025, 12, 20)
            .and_then(|d| d.and_hms_opt(17, 0, 0))
            .expect("valid datetime");
        let mut record = InvitationRecord::new("Arely-America", "Arely", at);
        record.hashtag = Some("#ArelyXV".to_string());
        record.reception = Some(Venue {
            address: "Salón Los Arcos, Puebla".to_string(),
            place_ref: "abc123".to_string(),
            image: None,
            time: None,
        });
        record
    }

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 12, 20, 23, 0, 0).single().expect("start")
    }

    #[test]
    fn map_link_uses_place_ref() {
        let record = record();
        let venue = record.reception.as_ref().expect("venue");
        assert_eq!(map_url(venue), "https://maps.app.goo.gl/abc123");
    }

    #[test]
    fn google_dates_are_compact_utc_four_hours_apart() {
        let url = google_calendar_url(&record(), start());
        assert!(url.contains("&dates=20251220T230000Z/20251221T030000Z&"));
        assert!(url.contains("text=XV%20A%C3%B1os%20de%20Arely"));
        assert!(url.contains("location=Sal%C3%B3n%20Los%20Arcos%2C%20Puebla"));
    }

    #[test]
    fn outlook_uses_rfc3339() {
        let url = outlook_calendar_url(&record(), start());
        assert!(url.contains("startdt=2025-12-20T23%3A00%3A00Z"));
        assert!(url.contains("enddt=2025-12-21T03%3A00%3A00Z"));
    }

    #[test]
    fn share_text_includes_hashtag() {
        assert_eq!(share_text(&record()), "¡Celebrando los XV años de Arely! #ArelyXV");
        let url = twitter_share_url(&record(), "https://x.test/a");
        assert!(url.ends_with("&url=https%3A%2F%2Fx.test%2Fa"));
    }

    #[test]
    fn hashtag_pages_drop_the_hash() {
        assert_eq!(
            instagram_tag_url("#ArelyXV"),
            "https://www.instagram.com/explore/tags/ArelyXV/"
        );
        assert_eq!(tiktok_tag_url("ArelyXV"), "https://www.tiktok.com/tag/ArelyXV");
    }

    #[test]
    fn asset_urls() {
        assert_eq!(
            asset_url("/invitation_project", "/images/a.jpg"),
            "/invitation_project/images/a.jpg"
        );
        assert_eq!(asset_url("/", "images/a.jpg"), "/images/a.jpg");
        assert_eq!(
            asset_url("/invitation_project", "https://cdn.test/a.jpg"),
            "https://cdn.test/a.jpg"
        );
    }

    #[test]
    fn contact_links_only_when_present() {
        let mut record = record();
        let links = LinkSet::build(&record, start(), "https://x.test");
        assert!(links.whatsapp.is_none());
        assert!(links.phone.is_none());
        assert!(links.ceremony_map.is_none());

        record.contact = Some(Contact {
            phone: Some("+52 222 123 4567".to_string()),
            whatsapp: Some("52 222 123 4567".to_string()),
        });
        let links = LinkSet::build(&record, start(), "https://x.test");
        assert_eq!(links.phone.as_deref(), Some("tel:+522221234567"));
        assert!(
            links
                .whatsapp
                .as_deref()
                .is_some_and(|url| url.starts_with("https://wa.me/522221234567?text="))
        );
        assert!(links.entries().iter().any(|(label, _)| *label == "WhatsApp"));
    }
}
