use yew::{
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct HighlightPanelProps {
  pub image: Option<String>,
  pub text:  Option<String>
}

#[function_component(HighlightPanel)]
pub fn highlight_panel(
  props: &HighlightPanelProps
) -> Html {
  html! {
      <section class="page-section highlight">
          if let Some(src) = &props.image {
              <img class="highlight-image" src={src.clone()} alt="" loading="lazy" />
          }
          if let Some(text) = &props.text {
              <p class="highlight-text">{ text.clone() }</p>
          }
      </section>
  }
}
