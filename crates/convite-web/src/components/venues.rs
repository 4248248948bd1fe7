use convite_core::sections::Section;
use yew::{
  Html,
  Properties,
  function_component,
  html
};

use super::SectionFrame;

/// One venue, resolved for display.
#[derive(Debug, Clone, PartialEq)]
pub struct VenueCard {
  pub title:   String,
  pub address: String,
  pub map_url: Option<String>,
  pub image:   Option<String>,
  pub time:    Option<String>
}

#[derive(Properties, PartialEq)]
pub struct VenuesProps {
  pub cards: Vec<VenueCard>,
  pub image: Option<String>
}

#[function_component(Venues)]
pub fn venues(
  props: &VenuesProps
) -> Html {
  html! {
      <SectionFrame class="venues" title={Section::Venues.title()} image={props.image.clone()}>
          <div class="venue-grid">
              { for props.cards.iter().map(venue_card) }
          </div>
      </SectionFrame>
  }
}

fn venue_card(card: &VenueCard) -> Html {
  html! {
      <article class="venue-card">
          if let Some(src) = &card.image {
              <img class="venue-image" src={src.clone()} alt={card.title.clone()} loading="lazy" />
          }
          <h3>{ card.title.clone() }</h3>
          if let Some(time) = &card.time {
              <p class="venue-time">{ format!("{time} hrs") }</p>
          }
          <p class="venue-address">{ card.address.clone() }</p>
          if let Some(url) = &card.map_url {
              <a class="btn" href={url.clone()} target="_blank" rel="noopener noreferrer">
                  { "Ver Ubicación" }
              </a>
          }
      </article>
  }
}
