use chrono::{
  Datelike,
  NaiveDate
};

use crate::datetime::month_name_es;

pub const WEEKDAY_LABELS_ES: [&str; 7] = [
  "Dom", "Lun", "Mar", "Mié", "Jue",
  "Vie", "Sáb"
];

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum DayCell {
  Blank,
  Day(u32)
}

impl DayCell {
  pub fn day(self) -> Option<u32> {
    match self {
      | DayCell::Blank => None,
      | DayCell::Day(day) => Some(day)
    }
  }
}

/// Sunday-first month grid: leading
/// blanks, then one cell per day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
  pub year:          i32,
  /// Zero-based (0 = January).
  pub month0:        u32,
  pub highlight_day: u32,
  pub cells:         Vec<DayCell>
}

impl MonthGrid {
  /// Grid for the month containing
  /// `date`, highlighting its day.
  pub fn for_date(
    date: NaiveDate
  ) -> Self {
    Self::for_month(
      date.year(),
      date.month0(),
      date.day()
    )
    .unwrap_or_else(|| Self {
      year:          date.year(),
      month0:        date.month0(),
      highlight_day: date.day(),
      cells:         Vec::new()
    })
  }

  /// `None` when `month0` is not a
  /// month index.
  pub fn for_month(
    year: i32,
    month0: u32,
    highlight_day: u32
  ) -> Option<Self> {
    let first = first_day_of_month(
      year, month0
    )?;
    let leading = first
      .weekday()
      .num_days_from_sunday();
    let total =
      days_in_month(year, month0)?;

    let mut cells = Vec::with_capacity(
      (leading + total) as usize
    );
    cells.extend(
      (0..leading).map(|_| DayCell::Blank)
    );
    cells.extend(
      (1..=total).map(DayCell::Day)
    );

    Some(Self {
      year,
      month0,
      highlight_day,
      cells
    })
  }

  pub fn leading_blanks(&self) -> usize {
    self
      .cells
      .iter()
      .take_while(|cell| {
        **cell == DayCell::Blank
      })
      .count()
  }

  pub fn day_count(&self) -> usize {
    self
      .cells
      .iter()
      .filter(|cell| {
        cell.day().is_some()
      })
      .count()
  }

  pub fn is_highlighted(
    &self,
    cell: DayCell
  ) -> bool {
    cell.day() == Some(self.highlight_day)
  }

  /// Rows of seven; the last row may be
  /// short.
  pub fn weeks(
    &self
  ) -> impl Iterator<Item = &[DayCell]> {
    self.cells.chunks(7)
  }

  pub fn month_label(&self) -> String {
    format!(
      "{} {}",
      month_name_es(self.month0),
      self.year
    )
  }
}

fn first_day_of_month(
  year: i32,
  month0: u32
) -> Option<NaiveDate> {
  NaiveDate::from_ymd_opt(
    year,
    month0.checked_add(1)?,
    1
  )
}

pub fn days_in_month(
  year: i32,
  month0: u32
) -> Option<u32> {
  let first =
    first_day_of_month(year, month0)?;
  let next = if month0 >= 11 {
    NaiveDate::from_ymd_opt(
      year.checked_add(1)?,
      1,
      1
    )?
  } else {
    NaiveDate::from_ymd_opt(
      year,
      month0 + 2,
      1
    )?
  };
  u32::try_from(
    next
      .signed_duration_since(first)
      .num_days()
  )
  .ok()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn date(
    y: i32,
    m: u32,
    d: u32
  ) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d)
      .expect("valid date")
  }

  #[test]
  fn december_2025_grid() {
    let grid =
      MonthGrid::for_date(date(
        2025, 12, 20
      ));
    let first_weekday = date(2025, 12, 1)
      .weekday()
      .num_days_from_sunday()
      as usize;

    assert_eq!(grid.year, 2025);
    assert_eq!(grid.month0, 11);
    assert_eq!(
      grid.leading_blanks(),
      first_weekday
    );
    assert_eq!(grid.leading_blanks(), 1);
    assert_eq!(grid.day_count(), 31);
    assert_eq!(grid.highlight_day, 20);
    assert!(
      grid.is_highlighted(DayCell::Day(
        20
      ))
    );
    assert!(
      !grid.is_highlighted(DayCell::Blank)
    );
    assert_eq!(
      grid.month_label(),
      "Diciembre 2025"
    );
  }

  #[test]
  fn february_leap_years() {
    let leap =
      MonthGrid::for_month(2024, 1, 1)
        .expect("valid month");
    let common =
      MonthGrid::for_month(2025, 1, 1)
        .expect("valid month");
    assert_eq!(leap.day_count(), 29);
    assert_eq!(common.day_count(), 28);
    assert_eq!(
      days_in_month(1900, 1),
      Some(28)
    );
    assert_eq!(
      days_in_month(2000, 1),
      Some(29)
    );
  }

  #[test]
  fn sunday_start_has_no_blanks() {
    let grid =
      MonthGrid::for_date(date(
        2026, 2, 14
      ));
    assert_eq!(grid.leading_blanks(), 0);
    assert_eq!(
      grid.cells.first(),
      Some(&DayCell::Day(1))
    );
    assert_eq!(grid.weeks().count(), 4);
  }

  #[test]
  fn invalid_month_index() {
    assert!(
      MonthGrid::for_month(2025, 12, 1)
        .is_none()
    );
    assert_eq!(
      days_in_month(2025, 11),
      Some(31)
    );
  }

  #[test]
  fn weeks_are_seven_wide() {
    let grid =
      MonthGrid::for_date(date(
        2025, 8, 1
      ));
    let weeks: Vec<_> =
      grid.weeks().collect();
    assert!(
      weeks[..weeks.len() - 1]
        .iter()
        .all(|row| row.len() == 7)
    );
    assert_eq!(
      grid.cells.len(),
      grid.leading_blanks() + 31
    );
  }
}
