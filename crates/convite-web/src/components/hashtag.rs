use convite_core::sections::Section;
use gloo::timers::callback::Timeout;
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html,
  use_state
};

use super::SectionFrame;
use crate::download::copy_then;

const COPIED_FEEDBACK_MS: u32 = 2_000;

#[derive(Properties, PartialEq)]
pub struct HashtagProps {
  pub hashtag:   String,
  pub share_url: String,
  pub instagram: Option<String>,
  pub tiktok:    Option<String>,
  pub image:     Option<String>
}

#[function_component(Hashtag)]
pub fn hashtag(
  props: &HashtagProps
) -> Html {
  let copied = use_state(|| false);

  let on_copy = {
    let copied = copied.clone();
    let text = props.hashtag.clone();
    Callback::from(move |_| {
      let copied = copied.clone();
      copy_then(text.clone(), move || {
        copied.set(true);
        let copied = copied.clone();
        Timeout::new(
          COPIED_FEEDBACK_MS,
          move || copied.set(false)
        )
        .forget();
      });
    })
  };

  html! {
      <SectionFrame class="hashtag" title={Section::Hashtag.title()} image={props.image.clone()}>
          <p class="hashtag-kicker">{ "Hashtag Oficial" }</p>
          <p class="hashtag-value">{ props.hashtag.clone() }</p>
          <div class="hashtag-actions">
              <button class="btn" type="button" onclick={on_copy}>
                  { if *copied { "¡Copiado!" } else { "Copiar Hashtag" } }
              </button>
              <a class="btn" href={props.share_url.clone()} target="_blank" rel="noopener noreferrer">
                  { "Compartir en X" }
              </a>
              if let Some(url) = &props.instagram {
                  <a class="btn" href={url.clone()} target="_blank" rel="noopener noreferrer">
                      { "Instagram" }
                  </a>
              }
              if let Some(url) = &props.tiktok {
                  <a class="btn" href={url.clone()} target="_blank" rel="noopener noreferrer">
                      { "TikTok" }
                  </a>
              }
          </div>
      </SectionFrame>
  }
}
