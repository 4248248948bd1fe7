use convite_core::sections::Section;
use yew::{
  Html,
  Properties,
  function_component,
  html
};

use super::SectionFrame;

#[derive(Properties, PartialEq)]
pub struct ParentsProps {
  pub parents: Vec<String>
}

#[function_component(Parents)]
pub fn parents(
  props: &ParentsProps
) -> Html {
  html! {
      <SectionFrame class="parents" title={Section::Parents.title()}>
          <ul class="name-list">
              { for props.parents.iter().map(|name| html! {
                  <li>{ name.clone() }</li>
              }) }
          </ul>
      </SectionFrame>
  }
}
