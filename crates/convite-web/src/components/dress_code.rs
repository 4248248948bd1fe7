use convite_core::sections::Section;
use yew::{
  Html,
  Properties,
  function_component,
  html
};

use super::SectionFrame;

#[derive(Properties, PartialEq)]
pub struct DressCodeProps {
  pub description: String,
  pub image:       Option<String>
}

#[function_component(DressCode)]
pub fn dress_code(
  props: &DressCodeProps
) -> Html {
  html! {
      <SectionFrame class="dress-code" title={Section::DressCode.title()} image={props.image.clone()}>
          <p class="dress-code-kicker">{ "¿Qué vestir?" }</p>
          <p class="dress-code-text">{ props.description.clone() }</p>
      </SectionFrame>
  }
}
