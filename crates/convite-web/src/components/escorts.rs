use convite_core::record::Person;
use convite_core::sections::Section;
use yew::{
  Html,
  Properties,
  function_component,
  html
};

use super::SectionFrame;
use crate::app::use_site;

#[derive(Properties, PartialEq)]
pub struct EscortsProps {
  pub people: Vec<Person>,
  pub image:  Option<String>
}

#[function_component(Escorts)]
pub fn escorts(
  props: &EscortsProps
) -> Html {
  let site = use_site();

  html! {
      <SectionFrame class="escorts" title={Section::Escorts.title()} image={props.image.clone()}>
          <div class="people-grid">
              { for props.people.iter().map(|person| html! {
                  <figure class="person">
                      if let Some(src) = &person.image {
                          <img src={site.asset(src)} alt={person.name.clone()} loading="lazy" />
                      }
                      <figcaption>{ person.name.clone() }</figcaption>
                  </figure>
              }) }
          </div>
      </SectionFrame>
  }
}
