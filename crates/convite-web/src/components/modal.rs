use yew::{
  AttrValue,
  Callback,
  Children,
  Html,
  MouseEvent,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct ModalProps {
  #[prop_or_default]
  pub title:    Option<AttrValue>,
  pub on_close: Callback<MouseEvent>,
  #[prop_or_default]
  pub children: Children
}

/// Backdrop click closes; clicks inside
/// the dialog do not.
#[function_component(Modal)]
pub fn modal(
  props: &ModalProps
) -> Html {
  html! {
      <div class="modal-backdrop" onclick={props.on_close.clone()}>
          <div class="modal" onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}>
              if let Some(title) = &props.title {
                  <div class="header">{ title.clone() }</div>
              }
              <div class="content">
                  { props.children.clone() }
              </div>
          </div>
      </div>
  }
}
