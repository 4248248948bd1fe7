use convite_core::CountdownState;
use convite_core::countdown::{
  ARRIVED_MESSAGE,
  HEADING
};
use yew::{
  Html,
  Properties,
  function_component,
  html
};

use super::SectionFrame;

#[derive(Properties, PartialEq)]
pub struct CountdownProps {
  pub state: CountdownState,
  pub image: Option<String>
}

#[function_component(Countdown)]
pub fn countdown(
  props: &CountdownProps
) -> Html {
  html! {
      <SectionFrame class="countdown" title={HEADING} image={props.image.clone()}>
          if props.state.is_passed() {
              <p class="countdown-arrived">{ ARRIVED_MESSAGE }</p>
          } else {
              <div class="countdown-units">
                  { for props.state.units().into_iter().map(|(label, value)| html! {
                      <div class="countdown-unit">
                          <span class="countdown-value">{ format!("{value:02}") }</span>
                          <span class="countdown-label">{ label }</span>
                      </div>
                  }) }
              </div>
          }
      </SectionFrame>
  }
}
