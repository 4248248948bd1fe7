use std::rc::Rc;

use chrono::{
  DateTime,
  Utc
};
use chrono_tz::Tz;
use convite_core::countdown::CountdownState;
use convite_core::datetime::format_long_date_es;
use convite_core::ics::{
  ICS_MIME,
  calendar_file,
  calendar_filename
};
use convite_core::lifecycle::{
  Carousel,
  PageTasks,
  Tick
};
use convite_core::record::{
  InvitationRecord,
  VenueKind
};
use convite_core::route::Route;
use convite_core::sections::Section;
use convite_core::timeline::TimelineStatus;
use convite_core::InvitationSnapshot;
use gloo::events::EventListener;
use gloo::timers::callback::Interval;
use wasm_bindgen::JsCast;
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  Reducible,
  UseReducerHandle,
  function_component,
  html,
  use_effect_with,
  use_reducer,
  use_state
};

use super::use_site;
use crate::components::{
  Countdown,
  DressCode,
  Escorts,
  EventCalendar,
  Footer,
  Gallery,
  GiftRegistry,
  Hashtag,
  Header,
  HighlightPanel,
  Modal,
  MusicPlayer,
  Parents,
  Rsvp,
  Timeline,
  VenueCard,
  Venues
};
use crate::download::save_file;

/// Render state of one invitation page.
/// Ticks only touch their own part.
#[derive(Clone)]
struct PageState {
  record:   Rc<InvitationRecord>,
  tz:       Tz,
  snapshot: InvitationSnapshot,
  carousel: Carousel
}

enum PageAction {
  CountdownTick(DateTime<Utc>),
  TimelineTick(DateTime<Utc>),
  CarouselNext,
  CarouselPrev,
  CarouselSelect(usize)
}

impl Reducible for PageState {
  type Action = PageAction;

  fn reduce(
    self: Rc<Self>,
    action: Self::Action
  ) -> Rc<Self> {
    let mut next = (*self).clone();
    match action {
      | PageAction::CountdownTick(now) => {
        next.snapshot.countdown =
          CountdownState::compute(
            next.snapshot.event_start,
            now
          );
      }
      | PageAction::TimelineTick(now) => {
        let timeline =
          TimelineStatus::evaluate(
            &next.record.timeline,
            &now.with_timezone(&next.tz)
          );
        next.snapshot.current_entry =
          timeline.current_index();
        next.snapshot.timeline = timeline;
      }
      | PageAction::CarouselNext => {
        next.carousel.advance()
      }
      | PageAction::CarouselPrev => {
        next.carousel.back()
      }
      | PageAction::CarouselSelect(
        index
      ) => next.carousel.select(index)
    }
    Rc::new(next)
  }
}

/// Starts the page's periodic ticks.
/// Dropping the returned tasks stops
/// them all.
fn start_ticks(
  state: &UseReducerHandle<PageState>,
  passed: bool
) -> PageTasks {
  let mut tasks = PageTasks::new();

  for tick in Tick::ALL {
    let dispatcher = state.dispatcher();
    let wanted = match tick {
      | Tick::Countdown => !passed,
      | Tick::Timeline => {
        !state.record.timeline.is_empty()
      }
      | Tick::Carousel => {
        state.carousel.len() > 1
      }
    };
    if !wanted {
      continue;
    }

    let interval = Interval::new(
      tick.period_ms(),
      move || {
        let action = match tick {
          | Tick::Countdown => {
            PageAction::CountdownTick(
              Utc::now()
            )
          }
          | Tick::Timeline => {
            PageAction::TimelineTick(
              Utc::now()
            )
          }
          | Tick::Carousel => {
            PageAction::CarouselNext
          }
        };
        dispatcher.dispatch(action);
      }
    );
    tasks.register(tick.name(), move || {
      drop(interval)
    });
  }

  tracing::debug!(?tasks, "page ticks started");
  tasks
}

#[derive(Properties, PartialEq)]
pub struct InvitationPageProps {
  pub record: Rc<InvitationRecord>
}

#[function_component(InvitationPage)]
pub fn invitation_page(
  props: &InvitationPageProps
) -> Html {
  let site = use_site();
  let record = props.record.clone();
  let page_url = site.page_url(
    &Route::invitation(record.id.clone())
      .to_path(&site.cfg.base_path)
  );

  let state = {
    let record = record.clone();
    let tz = site.cfg.tz();
    use_reducer(move || {
      let snapshot =
        InvitationSnapshot::capture(
          &record,
          &tz,
          Utc::now(),
          &page_url
        );
      let carousel = Carousel::new(
        record.customization.gallery.len()
      );
      PageState {
        record,
        tz,
        snapshot,
        carousel
      }
    })
  };

  let lightbox =
    use_state(|| None::<String>);
  let decline_open = use_state(|| false);
  let envelope_open = use_state(|| false);

  {
    let state = state.clone();
    let passed =
      state.snapshot.countdown.is_passed();
    use_effect_with(
      (record.id.clone(), passed),
      move |(id, passed)| {
        tracing::info!(%id, passed, "invitation page mounted");
        let tasks =
          start_ticks(&state, *passed);
        move || drop(tasks)
      }
    );
  }

  {
    let lightbox = lightbox.clone();
    let open = lightbox.is_some();
    use_effect_with(open, move |open| {
      let listener = open
        .then(web_sys::window)
        .flatten()
        .map(|window| {
          EventListener::new(
            &window,
            "keydown",
            move |event| {
              let escape = event
                .dyn_ref::<web_sys::KeyboardEvent>()
                .is_some_and(|key| {
                  key.key() == "Escape"
                });
              if escape {
                lightbox.set(None);
              }
            }
          )
        });
      move || drop(listener)
    });
  }

  let snapshot = &state.snapshot;
  let custom = &record.customization;
  let asset = |reference: &Option<String>| {
    reference
      .as_deref()
      .map(|reference| site.asset(reference))
  };

  let on_download = {
    let record = record.clone();
    let start = snapshot.event_start;
    Callback::from(move |_: MouseEvent| {
      let contents = calendar_file(
        &record,
        start,
        Utc::now()
      );
      save_file(
        &calendar_filename(&record),
        ICS_MIME,
        &contents
      );
    })
  };
  let on_prev = {
    let state = state.clone();
    Callback::from(move |_: MouseEvent| {
      state.dispatch(
        PageAction::CarouselPrev
      )
    })
  };
  let on_next = {
    let state = state.clone();
    Callback::from(move |_: MouseEvent| {
      state.dispatch(
        PageAction::CarouselNext
      )
    })
  };
  let on_select = {
    let state = state.clone();
    Callback::from(move |index: usize| {
      state.dispatch(
        PageAction::CarouselSelect(index)
      )
    })
  };
  let on_open_image = {
    let lightbox = lightbox.clone();
    Callback::from(move |src: String| {
      lightbox.set(Some(src))
    })
  };
  let on_close_image = {
    let lightbox = lightbox.clone();
    Callback::from(move |_: MouseEvent| {
      lightbox.set(None)
    })
  };
  let on_decline = {
    let decline_open = decline_open.clone();
    Callback::from(move |_: MouseEvent| {
      decline_open.set(true)
    })
  };
  let on_close_decline = {
    let decline_open = decline_open.clone();
    Callback::from(move |_: MouseEvent| {
      decline_open.set(false)
    })
  };
  let on_envelope = {
    let envelope_open = envelope_open.clone();
    Callback::from(move |_: MouseEvent| {
      envelope_open.set(true)
    })
  };
  let on_close_envelope = {
    let envelope_open = envelope_open.clone();
    Callback::from(move |_: MouseEvent| {
      envelope_open.set(false)
    })
  };

  let venue_cards: Vec<VenueCard> = [
    (
      VenueKind::Ceremony,
      &snapshot.links.ceremony_map
    ),
    (
      VenueKind::Reception,
      &snapshot.links.reception_map
    )
  ]
  .into_iter()
  .filter_map(|(kind, map_url)| {
    let venue = record.venue(kind)?;
    Some(VenueCard {
      title:   kind.label().to_string(),
      address: venue.address.clone(),
      map_url: map_url.clone(),
      image:   asset(&venue.image),
      time:    record
        .venue_time(kind)
        .map(str::to_string)
    })
  })
  .collect();

  let gallery: Vec<String> = custom
    .gallery
    .iter()
    .map(|reference| site.asset(reference))
    .collect();

  let render_section = |section: Section| -> Html {
    match section {
      | Section::Header => html! {
          <Header
              title={Section::Header.title()}
              name={record.name.clone()}
              date_label={format_long_date_es(record.event_at.date())}
              phrase={record.phrase.clone()}
              image={asset(&custom.header_image)}
          />
      },
      | Section::Parents => html! {
          <Parents parents={record.parents.clone()} />
      },
      | Section::Countdown => html! {
          <Countdown
              state={snapshot.countdown}
              image={asset(&custom.countdown_image)}
          />
      },
      | Section::Calendar => html! {
          <EventCalendar
              grid={snapshot.calendar.clone()}
              time_label={record.venue_time(VenueKind::Ceremony).map(str::to_string)}
              google={snapshot.links.google_calendar.clone()}
              outlook={snapshot.links.outlook_calendar.clone()}
              image={asset(&custom.calendar_image)}
              on_download={on_download.clone()}
          />
      },
      | Section::Highlight(n) => {
        match record.highlight(n) {
          | Some(highlight) => html! {
              <HighlightPanel
                  image={asset(&highlight.image)}
                  text={highlight.text.clone()}
              />
          },
          | None => html! {}
        }
      }
      | Section::Escorts => html! {
          <Escorts
              people={record.escorts.clone().unwrap_or_default()}
              image={asset(&custom.escorts_image)}
          />
      },
      | Section::Venues => html! {
          <Venues
              cards={venue_cards.clone()}
              image={asset(&custom.location_image)}
          />
      },
      | Section::Timeline => html! {
          <Timeline
              entries={record.timeline.clone()}
              status={snapshot.timeline.clone()}
              current={snapshot.current_entry}
              image={asset(&custom.timeline_image)}
          />
      },
      | Section::Hashtag => html! {
          <Hashtag
              hashtag={record.hashtag().unwrap_or_default().to_string()}
              share_url={snapshot.links.share_twitter.clone()}
              instagram={snapshot.links.instagram.clone()}
              tiktok={snapshot.links.tiktok.clone()}
              image={asset(&custom.hashtag_image)}
          />
      },
      | Section::DressCode => html! {
          <DressCode
              description={record.dress_code().unwrap_or_default().to_string()}
              image={asset(&custom.dress_code_image)}
          />
      },
      | Section::Registry => html! {
          <GiftRegistry
              registries={record.registries.clone().unwrap_or_default()}
              image={asset(&custom.registry_image)}
              on_envelope={on_envelope.clone()}
          />
      },
      | Section::Gallery => html! {
          <Gallery
              images={gallery.clone()}
              index={state.carousel.index()}
              image={asset(&custom.gallery_image)}
              on_prev={on_prev.clone()}
              on_next={on_next.clone()}
              on_select={on_select.clone()}
              on_open={on_open_image.clone()}
          />
      },
      | Section::Rsvp => html! {
          <Rsvp
              rsvp={snapshot.links.rsvp.clone()}
              whatsapp={snapshot.links.whatsapp.clone()}
              phone={snapshot.links.phone.clone()}
              image={asset(&custom.rsvp_image)}
              on_decline={on_decline.clone()}
          />
      },
      | Section::Footer => html! {
          <Footer brand={site.cfg.brand.clone()} />
      },
      | Section::MusicPlayer => {
        match record.music() {
          | Some(music) => html! {
              <MusicPlayer src={site.asset(music)} />
          },
          | None => html! {}
        }
      }
    }
  };

  html! {
      <main class="invitation-page">
          { for snapshot.sections.iter().copied().map(render_section) }

          if let Some(src) = (*lightbox).clone() {
              <div class="lightbox" onclick={on_close_image.clone()}>
                  <button class="lightbox-close" type="button" onclick={on_close_image}>
                      { "✕" }
                  </button>
                  <img src={src} alt="Vista ampliada" />
              </div>
          }

          if *decline_open {
              <Modal on_close={on_close_decline.clone()}>
                  <p class="modal-message">
                      { "Gracias por avisarnos, te extrañaremos 💔" }
                  </p>
                  <button class="btn primary" type="button" onclick={on_close_decline}>
                      { "Cerrar" }
                  </button>
              </Modal>
          }

          if *envelope_open {
              <Modal title="Lluvia de Sobres" on_close={on_close_envelope.clone()}>
                  <p>
                      { "El mejor regalo es tu presencia en este día tan especial. Pero si deseas obsequiar algo más, un sobre con tu cariño será recibido con profunda gratitud." }
                  </p>
                  { bank_details(&record) }
                  <button class="btn primary" type="button" onclick={on_close_envelope}>
                      { "Cerrar" }
                  </button>
              </Modal>
          }
      </main>
  }
}

fn bank_details(
  record: &InvitationRecord
) -> Html {
  match &record.bank_transfer {
    | Some(bank) => html! {
        <dl class="bank-details">
            <dt>{ "Banco" }</dt>
            <dd>{ bank.bank.clone() }</dd>
            <dt>{ "CLABE" }</dt>
            <dd>{ bank.clabe.clone() }</dd>
            <dt>{ "Número de Tarjeta" }</dt>
            <dd>{ bank.card_number.clone() }</dd>
        </dl>
    },
    | None => html! {
        <p class="field-help">
            { "Los datos bancarios no están disponibles en este momento." }
        </p>
    }
  }
}
