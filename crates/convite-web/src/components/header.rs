use yew::{
  AttrValue,
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
  pub title:      AttrValue,
  pub name:       String,
  pub date_label: String,
  pub phrase:     Option<String>,
  pub image:      Option<String>
}

#[function_component(Header)]
pub fn header(
  props: &HeaderProps
) -> Html {
  let style = props.image.as_ref().map(|src| {
    format!("background-image: url('{src}');")
  });

  html! {
      <header class="hero" style={style}>
          <div class="hero-overlay">
              <p class="hero-kicker">{ props.title.clone() }</p>
              <h1 class="hero-name">{ props.name.clone() }</h1>
              <p class="hero-date">{ props.date_label.clone() }</p>
              if let Some(phrase) = &props.phrase {
                  <blockquote class="hero-phrase">{ phrase.clone() }</blockquote>
              }
          </div>
      </header>
  }
}
