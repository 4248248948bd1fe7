use yew::{
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct FooterProps {
  pub brand: String
}

#[function_component(Footer)]
pub fn footer(
  props: &FooterProps
) -> Html {
  html! {
      <footer class="page-footer">
          <p class="footer-brand">{ props.brand.clone() }</p>
          <p>{ "Invitaciones digitales personalizadas con estilo y elegancia." }</p>
      </footer>
  }
}
