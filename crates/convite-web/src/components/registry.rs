use convite_core::record::Registry;
use convite_core::sections::Section;
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  function_component,
  html
};

use super::SectionFrame;

#[derive(Properties, PartialEq)]
pub struct GiftRegistryProps {
  pub registries:  Vec<Registry>,
  pub image:       Option<String>,
  pub on_envelope: Callback<MouseEvent>
}

#[function_component(GiftRegistry)]
pub fn gift_registry(
  props: &GiftRegistryProps
) -> Html {
  let intro = if props.registries.is_empty() {
    "Si deseas contribuir, puedes hacerlo mediante transferencia bancaria:"
  } else {
    "Si deseas obsequiarnos algo especial, puedes elegir entre estas opciones:"
  };

  html! {
      <SectionFrame class="registry" title={Section::Registry.title()} image={props.image.clone()}>
          <p class="registry-kicker">{ "Tu Presencia es el Mejor Regalo" }</p>
          <p>{ intro }</p>
          <div class="registry-grid">
              { for props.registries.iter().map(registry_card) }
              <article class="registry-card">
                  <h3>{ "Lluvia de sobres" }</h3>
                  <button class="btn" type="button" onclick={props.on_envelope.clone()}>
                      { "Ver Detalles" }
                  </button>
              </article>
          </div>
      </SectionFrame>
  }
}

fn registry_card(
  registry: &Registry
) -> Html {
  html! {
      <article class="registry-card">
          <h3>{ registry.name.clone() }</h3>
          if let Some(link) = &registry.link {
              <a class="btn" href={link.clone()} target="_blank" rel="noopener noreferrer">
                  { "Ver Opciones" }
              </a>
          }
      </article>
  }
}
