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
pub struct RsvpProps {
  pub rsvp:       Option<String>,
  pub whatsapp:   Option<String>,
  pub phone:      Option<String>,
  pub image:      Option<String>,
  pub on_decline: Callback<MouseEvent>
}

#[function_component(Rsvp)]
pub fn rsvp(props: &RsvpProps) -> Html {
  // Accepting goes to the external form,
  // else straight to WhatsApp.
  let accept =
    props.rsvp.clone().or_else(|| {
      props.whatsapp.clone()
    });

  html! {
      <SectionFrame class="rsvp" title={Section::Rsvp.title()} image={props.image.clone()}>
          <p>
              { "Tu presencia es muy importante para nosotros. Confirma tu asistencia de la manera que prefieras." }
          </p>
          <div class="rsvp-actions">
              if let Some(url) = accept {
                  <a class="btn primary" href={url} target="_blank" rel="noopener noreferrer">
                      { "Sí, asistiré" }
                  </a>
              }
              <button class="btn" type="button" onclick={props.on_decline.clone()}>
                  { "No podré" }
              </button>
          </div>
          <div class="rsvp-contact">
              if let Some(url) = &props.whatsapp {
                  <a class="btn ghost" href={url.clone()} target="_blank" rel="noopener noreferrer">
                      { "WhatsApp" }
                  </a>
              }
              if let Some(url) = &props.phone {
                  <a class="btn ghost" href={url.clone()}>
                      { "Llamar" }
                  </a>
              }
          </div>
      </SectionFrame>
  }
}
