use std::io::{self, IsTerminal, Write};

use convite_core::calendar::{DayCell, WEEKDAY_LABELS_ES};
use convite_core::countdown::{self, CountdownState};
use convite_core::record::{InvitationRecord, VenueKind};
use convite_core::store::InvitationSummary;
use convite_core::timeline::EntryKind;
use convite_core::InvitationSnapshot;
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self {
            color: color && io::stdout().is_terminal(),
        }
    }

    #[tracing::instrument(skip(self, out, summaries))]
    pub fn write_summaries<W: Write>(
        &self,
        out: &mut W,
        summaries: &[InvitationSummary],
    ) -> anyhow::Result<()> {
        let headers = vec![
            "ID".to_string(),
            "Nombre".to_string(),
            "Fecha".to_string(),
            "Hashtag".to_string(),
            "Padres".to_string(),
        ];

        let rows = summaries
            .iter()
            .map(|summary| {
                vec![
                    self.paint(&summary.id, "33"),
                    summary.name.clone(),
                    summary.date_label.clone(),
                    summary.hashtag.clone().unwrap_or_default(),
                    summary.parents_label.clone(),
                ]
            })
            .collect();

        write_table(out, headers, rows)
    }

    pub fn countdown_line(&self, state: &CountdownState) -> String {
        if state.is_passed() {
            return self.paint(countdown::ARRIVED_MESSAGE, "35");
        }
        state
            .units()
            .iter()
            .map(|(label, value)| format!("{} {label}", self.paint(&value.to_string(), "1")))
            .collect::<Vec<_>>()
            .join("  ")
    }

    #[tracing::instrument(skip_all, fields(id = %record.id))]
    pub fn write_snapshot<W: Write>(
        &self,
        out: &mut W,
        record: &InvitationRecord,
        snapshot: &InvitationSnapshot,
    ) -> anyhow::Result<()> {
        writeln!(out, "{}", self.paint(&snapshot.title, "1"))?;
        writeln!(
            out,
            "{}  {}",
            convite_core::datetime::format_long_date_es(record.event_at.date()),
            record.event_at.format("%H:%M")
        )?;
        if let Some(phrase) = record.phrase.as_deref() {
            writeln!(out, "\"{phrase}\"")?;
        }
        if !record.parents.is_empty() {
            writeln!(out, "Padres: {}", record.parents.join(" y "))?;
        }

        writeln!(out)?;
        writeln!(out, "{}", countdown::HEADING)?;
        writeln!(out, "  {}", self.countdown_line(&snapshot.countdown))?;

        writeln!(out)?;
        self.write_calendar(out, snapshot)?;

        for kind in [VenueKind::Ceremony, VenueKind::Reception] {
            if let Some(venue) = record.venue(kind) {
                writeln!(out)?;
                writeln!(out, "{}", kind.label())?;
                writeln!(out, "  {}", venue.address)?;
                if let Some(time) = record.venue_time(kind) {
                    writeln!(out, "  {time} hrs")?;
                }
            }
        }

        if !record.timeline.is_empty() {
            writeln!(out)?;
            writeln!(out, "Itinerario")?;
            for (idx, entry) in record.timeline.iter().enumerate() {
                let marker = if snapshot.current_entry == Some(idx) {
                    self.paint("▶", "32")
                } else if snapshot.timeline.is_passed(idx) {
                    self.paint("✓", "32")
                } else {
                    " ".to_string()
                };
                writeln!(
                    out,
                    "  {marker} {} {:>5}  {}",
                    EntryKind::classify(&entry.label).icon(),
                    entry.time,
                    entry.label
                )?;
            }
        }

        writeln!(out)?;
        let titles = snapshot
            .sections
            .iter()
            .map(|section| section.title())
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(out, "Secciones: {titles}")?;
        Ok(())
    }

    fn write_calendar<W: Write>(
        &self,
        out: &mut W,
        snapshot: &InvitationSnapshot,
    ) -> anyhow::Result<()> {
        let grid = &snapshot.calendar;
        writeln!(out, "{:^27}", grid.month_label())?;
        let header = WEEKDAY_LABELS_ES
            .iter()
            .map(|label| format!("{label:>3}"))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(out, "{header}")?;

        for week in grid.weeks() {
            let row = week
                .iter()
                .map(|cell| match cell {
                    DayCell::Blank => "   ".to_string(),
                    DayCell::Day(day) if grid.is_highlighted(*cell) => {
                        if self.color {
                            self.paint(&format!("{day:>3}"), "7")
                        } else {
                            format!("[{day:>2}]")
                        }
                    }
                    DayCell::Day(day) => format!("{day:>3}"),
                })
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(out, "{}", row.trim_end())?;
        }
        Ok(())
    }

    pub fn write_links<W: Write>(
        &self,
        out: &mut W,
        snapshot: &InvitationSnapshot,
    ) -> anyhow::Result<()> {
        let headers = vec!["Enlace".to_string(), "URL".to_string()];
        let rows = snapshot
            .links
            .entries()
            .into_iter()
            .map(|(label, url)| vec![label.to_string(), url.to_string()])
            .collect();
        write_table(out, headers, rows)
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

fn write_table<W: Write>(
    mut writer: W,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
) -> anyhow::Result<()> {
    let column_count = headers.len();
    let mut widths = vec![0usize; column_count];

    for (idx, header) in headers.iter().enumerate() {
        widths[idx] = widths[idx].max(UnicodeWidthStr::width(header.as_str()));
    }

    for row in &rows {
        for (idx, cell) in row.iter().enumerate().take(column_count) {
            widths[idx] = widths[idx].max(visible_width(cell));
        }
    }

    let line = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad(header, *width))
        .collect::<Vec<_>>()
        .join(" ");
    writeln!(writer, "{}", line.trim_end())?;

    let rule = widths
        .iter()
        .map(|width| "-".repeat(*width))
        .collect::<Vec<_>>()
        .join(" ");
    writeln!(writer, "{rule}")?;

    for row in rows {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| pad(cell, *width))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(writer, "{}", line.trim_end())?;
    }

    Ok(())
}

fn pad(cell: &str, width: usize) -> String {
    let visible = visible_width(cell);
    format!("{cell}{}", " ".repeat(width.saturating_sub(visible)))
}

/// Display width of a cell, not counting CSI escape sequences
/// (`ESC [` parameters, then one final byte in `@..=~`).
fn visible_width(cell: &str) -> usize {
    let mut width = 0;
    let mut rest = cell;

    while let Some(pos) = rest.find('\x1b') {
        width += UnicodeWidthStr::width(&rest[..pos]);
        let after = &rest[pos + 1..];
        rest = match after.strip_prefix('[') {
            Some(params) => match params.find(|ch: char| ('@'..='~').contains(&ch)) {
                Some(end) => &params[end + 1..],
                None => "",
            },
            // Lone escape: drop it and the char that follows.
            None => after.chars().next().map_or("", |ch| &after[ch.len_utf8()..]),
        };
    }

    width + UnicodeWidthStr::width(rest)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use convite_core::InvitationStore;

    use super::*;

    fn plain() -> Renderer {
        Renderer { color: false }
    }

    #[test]
    fn table_pads_by_display_width() {
        let mut out = Vec::new();
        write_table(
            &mut out,
            vec!["A".to_string(), "B".to_string()],
            vec![
                vec!["Sofía".to_string(), "x".to_string()],
                vec!["\x1b[33mab\x1b[0m".to_string(), "y".to_string()],
            ],
        )
        .expect("table");
        let text = String::from_utf8(out).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "A     B");
        assert_eq!(lines[1], "----- -");
        assert_eq!(lines[2], "Sofía x");
        assert_eq!(lines[3], "\x1b[33mab\x1b[0m    y");
    }

    #[test]
    fn width_skips_csi_sequences() {
        assert_eq!(visible_width("plain"), 5);
        assert_eq!(visible_width("\x1b[1;32mSofía\x1b[0m"), 5);
        // Parameters without `m` still end at their final byte.
        assert_eq!(visible_width("\x1b[2Kab"), 2);
        assert_eq!(visible_width("ab\x1b[31"), 2);
    }

    #[test]
    fn snapshot_marks_progress() {
        let store = InvitationStore::builtin().expect("builtin");
        let record = store.get("Arely-America").expect("record");
        let tz = chrono_tz::America::Mexico_City;
        let now = Utc.with_ymd_and_hms(2025, 12, 20, 0, 30, 0).single().expect("now");
        let snapshot = InvitationSnapshot::capture(record, &tz, now, "https://x.test");

        let mut out = Vec::new();
        plain().write_snapshot(&mut out, record, &snapshot).expect("render");
        let text = String::from_utf8(out).expect("utf8");

        assert!(text.starts_with("XV Años de Arely\n"));
        assert!(text.contains("Diciembre 2025"));
        assert!(text.contains("[20]"));
        assert!(text.contains("✓ 🕒 17:00  Misa"));
        assert!(text.contains("▶ 🎉 18:15  Recepción"));
        assert!(text.contains("0 Días  22 Horas  30 Minutos  0 Segundos"));
    }

    #[test]
    fn passed_countdown_message() {
        assert_eq!(
            plain().countdown_line(&CountdownState::Passed),
            countdown::ARRIVED_MESSAGE
        );
    }
}
