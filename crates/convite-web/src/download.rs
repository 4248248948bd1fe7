//! Browser side effects: file downloads
//! and clipboard writes.

use gloo::file::{
  Blob,
  ObjectUrl
};
use wasm_bindgen::{
  JsCast,
  JsValue
};
use wasm_bindgen_futures::JsFuture;

/// Offers `contents` to the visitor as a
/// file named `filename`.
pub fn save_file(
  filename: &str,
  mime: &str,
  contents: &str
) {
  if let Err(err) =
    try_save_file(filename, mime, contents)
  {
    tracing::warn!(
      filename,
      error = ?err,
      "download failed"
    );
  }
}

fn try_save_file(
  filename: &str,
  mime: &str,
  contents: &str
) -> Result<(), JsValue> {
  let document = web_sys::window()
    .and_then(|window| {
      window.document()
    })
    .ok_or_else(|| {
      JsValue::from_str("no document")
    })?;
  let body =
    document.body().ok_or_else(|| {
      JsValue::from_str("no body")
    })?;

  let blob = Blob::new_with_options(
    contents,
    Some(mime)
  );
  let url = ObjectUrl::from(blob);

  let anchor = document
    .create_element("a")?
    .dyn_into::<web_sys::HtmlAnchorElement>()?;
  anchor.set_href(&url);
  anchor.set_download(filename);
  body.append_child(&anchor)?;
  anchor.click();
  anchor.remove();

  tracing::info!(filename, "file offered for download");
  Ok(())
}

/// Writes `text` to the clipboard.
pub async fn copy_text(
  text: String
) -> Result<(), JsValue> {
  let window = web_sys::window()
    .ok_or_else(|| {
      JsValue::from_str("no window")
    })?;
  let promise = window
    .navigator()
    .clipboard()
    .write_text(&text);
  JsFuture::from(promise).await?;
  Ok(())
}

/// Copies `text`, then runs `done` once
/// the write succeeded.
pub fn copy_then(
  text: String,
  done: impl FnOnce() + 'static
) {
  wasm_bindgen_futures::spawn_local(
    async move {
      match copy_text(text).await {
        | Ok(()) => done(),
        | Err(err) => {
          tracing::warn!(
            error = ?err,
            "clipboard write failed"
          );
        }
      }
    }
  );
}
