use yew::{
  AttrValue,
  Html,
  Properties,
  function_component,
  html
};
use yew_router::prelude::Link;

use super::AppRoute;

#[derive(Properties, PartialEq)]
pub struct NoticeProps {
  pub title:     AttrValue,
  pub message:   AttrValue,
  #[prop_or_default]
  pub home_link: bool
}

#[function_component(Notice)]
pub fn notice(
  props: &NoticeProps
) -> Html {
  html! {
      <main class="notice-page">
          <div class="notice-card">
              <h1>{ props.title.clone() }</h1>
              <p>{ props.message.clone() }</p>
              if props.home_link {
                  <Link<AppRoute> classes="btn primary" to={AppRoute::Selector}>
                      { "Volver al inicio" }
                  </Link<AppRoute>>
              }
          </div>
      </main>
  }
}
