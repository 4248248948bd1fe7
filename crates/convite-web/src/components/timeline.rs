use convite_core::record::TimelineEntry;
use convite_core::sections::Section;
use convite_core::timeline::{
  EntryKind,
  TimelineStatus
};
use yew::{
  Html,
  Properties,
  classes,
  function_component,
  html
};

use super::SectionFrame;

#[derive(Properties, PartialEq)]
pub struct TimelineProps {
  pub entries: Vec<TimelineEntry>,
  pub status:  TimelineStatus,
  pub current: Option<usize>,
  pub image:   Option<String>
}

#[function_component(Timeline)]
pub fn timeline(
  props: &TimelineProps
) -> Html {
  html! {
      <SectionFrame class="timeline" title={Section::Timeline.title()} image={props.image.clone()}>
          <ol class="timeline-list">
              { for props.entries.iter().enumerate().map(|(index, entry)| {
                  let class = classes!(
                      "timeline-entry",
                      props.status.is_passed(index).then_some("passed"),
                      (props.current == Some(index)).then_some("current")
                  );
                  html! {
                      <li class={class}>
                          <span class="timeline-icon">
                              { EntryKind::classify(&entry.label).icon() }
                          </span>
                          <span class="timeline-time">{ entry.time.clone() }</span>
                          <span class="timeline-label">{ entry.label.clone() }</span>
                      </li>
                  }
              }) }
          </ol>
      </SectionFrame>
  }
}
