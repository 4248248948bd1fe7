use std::rc::Rc;

use convite_core::store::InvitationSummary;
use gloo::timers::callback::Timeout;
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  function_component,
  html,
  use_state
};
use yew_router::prelude::Link;

use super::{
  AppRoute,
  use_site
};
use crate::download::copy_then;

const COPIED_FEEDBACK_MS: u32 = 2_000;

#[derive(Properties, PartialEq)]
pub struct SelectorPageProps {
  pub cards:         Rc<Vec<InvitationSummary>>,
  pub on_exit_admin: Callback<MouseEvent>
}

#[function_component(SelectorPage)]
pub fn selector_page(
  props: &SelectorPageProps
) -> Html {
  let site = use_site();

  html! {
      <main class="selector-page">
          <header class="selector-header">
              <h1>{ site.cfg.brand.clone() }</h1>
              <p>{ "Selecciona una invitación para ver o compartir." }</p>
              <button
                  class="btn ghost"
                  type="button"
                  onclick={props.on_exit_admin.clone()}
              >
                  { "Salir del modo administrador" }
              </button>
          </header>
          <section class="selector-grid">
              { for props.cards.iter().map(|card| html! {
                  <SelectorCard key={card.id.clone()} card={card.clone()} />
              }) }
          </section>
      </main>
  }
}

#[derive(Properties, PartialEq)]
struct SelectorCardProps {
  card: InvitationSummary
}

#[function_component(SelectorCard)]
fn selector_card(
  props: &SelectorCardProps
) -> Html {
  let site = use_site();
  let copied = use_state(|| false);
  let card = &props.card;

  let on_copy = {
    let copied = copied.clone();
    let url = site.page_url(&card.path);
    Callback::from(move |_| {
      let copied = copied.clone();
      copy_then(url.clone(), move || {
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
      <article class="selector-card">
          <h2>{ card.name.clone() }</h2>
          <p class="selector-date">{ card.date_label.clone() }</p>
          if !card.parents_label.is_empty() {
              <p class="selector-parents">{ card.parents_label.clone() }</p>
          }
          if let Some(hashtag) = &card.hashtag {
              <p class="selector-hashtag">{ hashtag.clone() }</p>
          }
          <div class="selector-actions">
              <Link<AppRoute>
                  classes="btn primary"
                  to={AppRoute::Invitation { id: card.id.clone() }}
              >
                  { "Ver Invitación" }
              </Link<AppRoute>>
              <button class="btn" type="button" onclick={on_copy}>
                  { if *copied { "¡Copiado!" } else { "Copiar Link" } }
              </button>
          </div>
      </article>
  }
}
