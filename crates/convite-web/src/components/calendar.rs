use convite_core::calendar::{
  DayCell,
  MonthGrid,
  WEEKDAY_LABELS_ES
};
use convite_core::sections::Section;
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  classes,
  function_component,
  html
};

use super::SectionFrame;

#[derive(Properties, PartialEq)]
pub struct EventCalendarProps {
  pub grid:        MonthGrid,
  pub time_label:  Option<String>,
  pub google:      String,
  pub outlook:     String,
  pub image:       Option<String>,
  pub on_download: Callback<MouseEvent>
}

#[function_component(EventCalendar)]
pub fn event_calendar(
  props: &EventCalendarProps
) -> Html {
  let grid = &props.grid;

  let render_cell = |cell: &DayCell| {
    let class = classes!(
      "calendar-cell",
      grid
        .is_highlighted(*cell)
        .then_some("highlight")
    );
    match cell.day() {
      | Some(day) => html! {
          <div class={class}>{ day.to_string() }</div>
      },
      | None => html! {
          <div class="calendar-cell blank"></div>
      }
    }
  };

  html! {
      <SectionFrame class="calendar" title={Section::Calendar.title()} image={props.image.clone()}>
          <div class="calendar-card">
              <div class="calendar-month">{ grid.month_label() }</div>
              <div class="calendar-grid">
                  { for WEEKDAY_LABELS_ES.iter().map(|label| html! {
                      <div class="calendar-weekday">{ *label }</div>
                  }) }
                  { for grid.cells.iter().map(render_cell) }
              </div>
              if let Some(time) = &props.time_label {
                  <p class="calendar-time">{ format!("{time} hrs") }</p>
              }
          </div>
          <div class="calendar-actions">
              <a class="btn" href={props.google.clone()} target="_blank" rel="noopener noreferrer">
                  { "Google Calendar" }
              </a>
              <a class="btn" href={props.outlook.clone()} target="_blank" rel="noopener noreferrer">
                  { "Outlook" }
              </a>
              <button class="btn" type="button" onclick={props.on_download.clone()}>
                  { "Descargar (.ics)" }
              </button>
          </div>
      </SectionFrame>
  }
}
