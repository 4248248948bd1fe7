use yew::{
  AttrValue,
  Children,
  Html,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct SectionFrameProps {
  pub class:    AttrValue,
  #[prop_or_default]
  pub title:    Option<AttrValue>,
  /// Background image, when authored.
  #[prop_or_default]
  pub image:    Option<String>,
  #[prop_or_default]
  pub children: Children
}

#[function_component(SectionFrame)]
pub fn section_frame(
  props: &SectionFrameProps
) -> Html {
  let style = props
    .image
    .as_ref()
    .map(|src| {
      format!(
        "background-image: url('{src}');"
      )
    });
  let class = classes!(
    "page-section",
    props.class.to_string(),
    props.image.is_some().then_some("has-image")
  );

  html! {
      <section class={class} style={style}>
          <div class="section-inner">
              if let Some(title) = &props.title {
                  <h2 class="section-title">{ title.clone() }</h2>
              }
              { props.children.clone() }
          </div>
      </section>
  }
}
