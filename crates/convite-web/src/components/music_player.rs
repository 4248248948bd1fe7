use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlAudioElement;
use yew::{
  Callback,
  Html,
  MouseEvent,
  NodeRef,
  Properties,
  classes,
  function_component,
  html,
  use_node_ref,
  use_state
};

#[derive(Properties, PartialEq)]
pub struct MusicPlayerProps {
  pub src: String
}

/// Floating play/pause control for the
/// page's background music.
#[function_component(MusicPlayer)]
pub fn music_player(
  props: &MusicPlayerProps
) -> Html {
  let audio_ref = use_node_ref();
  let playing = use_state(|| false);

  let on_toggle = {
    let audio_ref = audio_ref.clone();
    let playing = playing.clone();
    Callback::from(move |_: MouseEvent| {
      let Some(audio) =
        audio_element(&audio_ref)
      else {
        return;
      };
      if *playing {
        if let Err(err) = audio.pause() {
          tracing::debug!(error = ?err, "pause failed");
        }
        playing.set(false);
      } else {
        start(&audio);
        playing.set(true);
      }
    })
  };

  let class = classes!(
    "music-toggle",
    (*playing).then_some("playing")
  );

  html! {
      <div class="music-player">
          <audio ref={audio_ref} src={props.src.clone()} loop=true preload="none" />
          <button class={class} type="button" onclick={on_toggle}>
              { if *playing { "❚❚" } else { "♪" } }
          </button>
      </div>
  }
}

fn audio_element(
  node: &NodeRef
) -> Option<HtmlAudioElement> {
  node.cast::<HtmlAudioElement>()
}

// Browsers may refuse playback (autoplay
// policy, missing file); the control just
// stays silent.
fn start(audio: &HtmlAudioElement) {
  match audio.play() {
    | Ok(promise) => {
      wasm_bindgen_futures::spawn_local(
        async move {
          if let Err(err) =
            JsFuture::from(promise).await
          {
            tracing::debug!(error = ?err, "audio playback refused");
          }
        }
      );
    }
    | Err(err) => {
      tracing::debug!(error = ?err, "audio playback refused");
    }
  }
}
