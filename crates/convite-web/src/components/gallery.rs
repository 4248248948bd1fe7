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
pub struct GalleryProps {
  /// Resolved image URLs.
  pub images:    Vec<String>,
  pub index:     usize,
  pub image:     Option<String>,
  pub on_prev:   Callback<MouseEvent>,
  pub on_next:   Callback<MouseEvent>,
  pub on_select: Callback<usize>,
  pub on_open:   Callback<String>
}

#[function_component(Gallery)]
pub fn gallery(
  props: &GalleryProps
) -> Html {
  let current = props.images.get(props.index);

  let body = match current {
    | None => html! {
        <p class="gallery-empty">
            { "La galería de fotos estará disponible próximamente" }
        </p>
    },
    | Some(src) => {
      let on_open = {
        let on_open = props.on_open.clone();
        let src = src.clone();
        Callback::from(move |_: MouseEvent| {
          on_open.emit(src.clone())
        })
      };
      let several = props.images.len() > 1;

      html! {
          <div class="carousel">
              <img class="carousel-image" src={src.clone()} alt="" onclick={on_open} />
              if several {
                  <button class="carousel-nav prev" type="button" onclick={props.on_prev.clone()}>
                      { "‹" }
                  </button>
                  <button class="carousel-nav next" type="button" onclick={props.on_next.clone()}>
                      { "›" }
                  </button>
                  <div class="carousel-dots">
                      { for (0..props.images.len()).map(|index| {
                          let on_select = props.on_select.clone();
                          let class = classes!(
                              "carousel-dot",
                              (index == props.index).then_some("active")
                          );
                          html! {
                              <button
                                  class={class}
                                  type="button"
                                  onclick={Callback::from(move |_: MouseEvent| on_select.emit(index))}
                              />
                          }
                      }) }
                  </div>
              }
          </div>
      }
    }
  };

  html! {
      <SectionFrame class="gallery" title={Section::Gallery.title()} image={props.image.clone()}>
          <p class="gallery-subtitle">
              { "Una colección de recuerdos que esperamos compartir contigo en este día tan especial" }
          </p>
          { body }
      </SectionFrame>
  }
}
