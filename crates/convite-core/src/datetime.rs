use chrono::{
  DateTime,
  Datelike,
  Duration,
  LocalResult,
  NaiveDate,
  NaiveDateTime,
  NaiveTime,
  TimeZone,
  Utc
};
use chrono_tz::Tz;

pub const DEFAULT_TIMEZONE: &str =
  "America/Mexico_City";

const EVENT_AT_FORMAT: &str =
  "%Y-%m-%dT%H:%M:%S";
const EVENT_AT_FORMAT_NO_SECONDS:
  &str = "%Y-%m-%dT%H:%M";

pub const MONTH_NAMES_ES: [&str; 12] = [
  "Enero",
  "Febrero",
  "Marzo",
  "Abril",
  "Mayo",
  "Junio",
  "Julio",
  "Agosto",
  "Septiembre",
  "Octubre",
  "Noviembre",
  "Diciembre"
];

pub fn parse_timezone(
  raw: &str,
  source: &str
) -> Option<Tz> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    tracing::warn!(
      source,
      "timezone source was empty"
    );
    return None;
  }

  match trimmed.parse::<Tz>() {
    | Ok(tz) => {
      tracing::debug!(
        source,
        timezone = %trimmed,
        "resolved event timezone"
      );
      Some(tz)
    }
    | Err(err) => {
      tracing::warn!(
        source,
        timezone = %trimmed,
        error = %err,
        "failed to parse timezone id"
      );
      None
    }
  }
}

pub fn default_timezone() -> Tz {
  parse_timezone(
    DEFAULT_TIMEZONE,
    "DEFAULT_TIMEZONE"
  )
  .unwrap_or(chrono_tz::UTC)
}

/// Pins a wall-clock time authored in
/// `tz` to an instant.
///
/// Ambiguous times (DST fall-back) take
/// the earliest instant. Times inside a
/// DST gap are moved past the gap.
pub fn local_to_utc(
  tz: &Tz,
  local_naive: NaiveDateTime
) -> DateTime<Utc> {
  match tz
    .from_local_datetime(&local_naive)
  {
    | LocalResult::Single(local_dt) => {
      local_dt.with_timezone(&Utc)
    }
    | LocalResult::Ambiguous(
      first,
      second
    ) => {
      tracing::warn!(
        local = %local_naive,
        first = %first,
        second = %second,
        "ambiguous local datetime; using earliest"
      );
      let chosen = if first <= second {
        first
      } else {
        second
      };
      chosen.with_timezone(&Utc)
    }
    | LocalResult::None => {
      tracing::warn!(
        local = %local_naive,
        timezone = %tz,
        "local datetime falls in a gap; shifting one hour"
      );
      let shifted =
        local_naive + Duration::hours(1);
      tz.from_local_datetime(&shifted)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| {
          DateTime::<Utc>::from_naive_utc_and_offset(
            local_naive,
            Utc
          )
        })
    }
  }
}

pub fn parse_event_at(
  raw: &str
) -> Result<NaiveDateTime, chrono::ParseError>
{
  let trimmed = raw.trim();
  NaiveDateTime::parse_from_str(
    trimmed,
    EVENT_AT_FORMAT
  )
  .or_else(|_| {
    NaiveDateTime::parse_from_str(
      trimmed,
      EVENT_AT_FORMAT_NO_SECONDS
    )
  })
}

/// Parses an `HH:MM` time of day.
/// Single-digit hours are accepted.
pub fn parse_time_of_day(
  raw: &str
) -> Option<NaiveTime> {
  let (hours, minutes) =
    raw.trim().split_once(':')?;
  let hours =
    hours.trim().parse::<u32>().ok()?;
  let minutes = minutes
    .trim()
    .parse::<u32>()
    .ok()?;
  NaiveTime::from_hms_opt(
    hours, minutes, 0
  )
}

pub fn month_name_es(
  month0: u32
) -> &'static str {
  MONTH_NAMES_ES
    .get(month0 as usize)
    .copied()
    .unwrap_or("")
}

#[must_use]
pub fn format_long_date_es(
  date: NaiveDate
) -> String {
  format!(
    "{} de {} de {}",
    date.day(),
    month_name_es(date.month0())
      .to_lowercase(),
    date.year()
  )
}

pub mod event_at_serde {
  use chrono::NaiveDateTime;
  use serde::{
    Deserialize,
    Deserializer,
    Serializer
  };

  use super::{
    EVENT_AT_FORMAT,
    parse_event_at
  };

  pub fn serialize<S>(
    dt: &NaiveDateTime,
    serializer: S
  ) -> Result<S::Ok, S::Error>
  where
    S: Serializer
  {
    serializer.serialize_str(
      &dt
        .format(EVENT_AT_FORMAT)
        .to_string()
    )
  }

  pub fn deserialize<'de, D>(
    deserializer: D
  ) -> Result<NaiveDateTime, D::Error>
  where
    D: Deserializer<'de>
  {
    let raw = String::deserialize(
      deserializer
    )?;
    parse_event_at(&raw).map_err(|err| {
      serde::de::Error::custom(format!(
        "invalid event_at {raw:?}: {err}"
      ))
    })
  }
}

#[cfg(test)]
mod tests {
  use chrono::{
    NaiveDate,
    TimeZone,
    Timelike,
    Utc
  };

  use super::*;

  #[test]
  fn mexico_city_event_pins_to_utc() {
    let tz = default_timezone();
    let local = parse_event_at(
      "2025-12-20T17:00:00"
    )
    .expect("valid event_at");
    let instant =
      local_to_utc(&tz, local);
    assert_eq!(
      instant,
      Utc
        .with_ymd_and_hms(
          2025, 12, 20, 23, 0, 0
        )
        .single()
        .expect("valid utc")
    );
  }

  #[test]
  fn local_time_in_dst_gap_moves_past_it() {
    let tz = chrono_tz::America::New_York;
    let local = parse_event_at(
      "2025-03-09T02:30:00"
    )
    .expect("valid event_at");
    // 02:30 does not exist; 03:30 EDT.
    assert_eq!(
      local_to_utc(&tz, local),
      Utc
        .with_ymd_and_hms(
          2025, 3, 9, 7, 30, 0
        )
        .single()
        .expect("valid utc")
    );
  }

  #[test]
  fn ambiguous_local_time_takes_earliest() {
    let tz = chrono_tz::America::New_York;
    let local = parse_event_at(
      "2025-11-02T01:30:00"
    )
    .expect("valid event_at");
    // 01:30 EDT, not 01:30 EST.
    assert_eq!(
      local_to_utc(&tz, local),
      Utc
        .with_ymd_and_hms(
          2025, 11, 2, 5, 30, 0
        )
        .single()
        .expect("valid utc")
    );
  }

  #[test]
  fn event_at_accepts_missing_seconds() {
    let parsed = parse_event_at(
      "2026-03-14T18:30"
    )
    .expect("minutes precision");
    assert_eq!(parsed.minute(), 30);
    assert!(
      parse_event_at("14/03/2026")
        .is_err()
    );
  }

  #[test]
  fn time_of_day_parsing() {
    assert_eq!(
      parse_time_of_day("8:05"),
      NaiveTime::from_hms_opt(8, 5, 0)
    );
    assert_eq!(
      parse_time_of_day(" 23:59 "),
      NaiveTime::from_hms_opt(
        23, 59, 0
      )
    );
    assert_eq!(
      parse_time_of_day("25:00"),
      None
    );
    assert_eq!(
      parse_time_of_day("noon"),
      None
    );
  }

  #[test]
  fn long_spanish_date() {
    let date =
      NaiveDate::from_ymd_opt(
        2025, 12, 20
      )
      .expect("valid date");
    assert_eq!(
      format_long_date_es(date),
      "20 de diciembre de 2025"
    );
  }

  #[test]
  fn unknown_timezone_is_rejected() {
    assert!(
      parse_timezone(
        "Mars/Olympus",
        "test"
      )
      .is_none()
    );
    assert_eq!(
      parse_timezone("UTC", "test"),
      Some(chrono_tz::UTC)
    );
  }
}
