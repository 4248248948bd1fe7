mod invitation;
mod notice;
mod selector;
mod storage;

use std::rc::Rc;

use convite_core::access::{
  ADMIN_QUERY_PARAM,
  AccessGate,
  Session
};
use convite_core::links::asset_url;
use convite_core::record::InvitationRecord;
use convite_core::route::{
  Route,
  normalize_base,
  query_param
};
use convite_core::store::InvitationSummary;
use convite_core::{
  InvitationStore,
  PageOutcome,
  SiteConfig
};
use yew::{
  Callback,
  ContextProvider,
  Html,
  Properties,
  function_component,
  html,
  use_context,
  use_effect_with,
  use_memo,
  use_state
};
use yew_router::prelude::{
  BrowserRouter,
  Routable,
  Switch,
  use_location,
  use_navigator
};

use self::invitation::InvitationPage;
use self::notice::Notice;
use self::selector::SelectorPage;
pub use self::storage::LocalStorageSession;

const EMBEDDED_CONFIG: &str =
  include_str!("../convite.toml");

/// Site settings and records, shared
/// through context.
#[derive(Clone)]
pub struct Site {
  pub cfg:   Rc<SiteConfig>,
  pub store: Rc<InvitationStore>
}

impl PartialEq for Site {
  fn eq(&self, other: &Self) -> bool {
    Rc::ptr_eq(&self.cfg, &other.cfg)
      && Rc::ptr_eq(
        &self.store,
        &other.store
      )
  }
}

impl Site {
  pub fn load() -> Self {
    let cfg = SiteConfig::from_toml_str(
      EMBEDDED_CONFIG
    )
    .unwrap_or_else(|err| {
      tracing::warn!(error = %err, "embedded config invalid; using defaults");
      SiteConfig::default()
    });

    let store =
      InvitationStore::builtin()
        .unwrap_or_else(|err| {
          tracing::error!(error = %err, "built-in invitation data invalid");
          InvitationStore::default()
        });

    tracing::info!(
      invitations = store.len(),
      base_path = %cfg.base_path,
      "site loaded"
    );

    Self {
      cfg:   Rc::new(cfg),
      store: Rc::new(store)
    }
  }

  pub fn asset(
    &self,
    reference: &str
  ) -> String {
    asset_url(
      &self.cfg.base_path,
      reference
    )
  }

  /// Absolute URL of a site path, as
  /// seen from the current origin.
  pub fn page_url(
    &self,
    path: &str
  ) -> String {
    web_sys::window()
      .and_then(|window| {
        window.location().origin().ok()
      })
      .map(|origin| {
        format!("{origin}{path}")
      })
      .unwrap_or_else(|| {
        self.cfg.absolute_url(path)
      })
  }
}

pub fn use_site() -> Site {
  // Only missing outside `App`.
  use_context::<Site>()
    .unwrap_or_else(Site::load)
}

#[derive(
  Routable, Debug, Clone, PartialEq,
)]
pub enum AppRoute {
  #[at("/")]
  Selector,
  #[at("/invitation")]
  MissingId,
  #[at("/invitation/:id")]
  Invitation { id: String },
  #[not_found]
  #[at("/404")]
  Other
}

impl AppRoute {
  fn from_route(route: &Route) -> Self {
    match route {
      | Route::Selector => {
        AppRoute::Selector
      }
      | Route::Invitation {
        id: Some(id)
      } => AppRoute::Invitation {
        id: id.clone()
      },
      | Route::Invitation { id: None } => {
        AppRoute::MissingId
      }
      | Route::Other(_) => AppRoute::Other
    }
  }
}

/// Owned form of a resolved navigation.
#[derive(Debug, Clone, PartialEq)]
enum View {
  Selector(Rc<Vec<InvitationSummary>>),
  Invitation(Rc<InvitationRecord>),
  Notice {
    title:     &'static str,
    message:   String,
    home_link: bool
  },
  Redirect(AppRoute)
}

impl View {
  fn from_outcome(
    outcome: PageOutcome<'_>
  ) -> Self {
    let message =
      outcome.notice().unwrap_or_default();
    match outcome {
      | PageOutcome::Selector(cards) => {
        View::Selector(Rc::new(cards))
      }
      | PageOutcome::Invitation(record) => {
        View::Invitation(Rc::new(
          record.clone()
        ))
      }
      | PageOutcome::MissingId => {
        View::Notice {
          title: "Invitación no disponible",
          message,
          home_link: false
        }
      }
      | PageOutcome::NotFound(_) => {
        View::Notice {
          title: "Invitación no encontrada",
          message,
          home_link: true
        }
      }
      | PageOutcome::Restricted => {
        View::Notice {
          title: "Acceso restringido",
          message:
            "Abre el enlace de tu invitación para continuar."
              .to_string(),
          home_link: false
        }
      }
      | PageOutcome::Redirect(target) => {
        View::Redirect(
          AppRoute::from_route(&target)
        )
      }
    }
  }
}

#[function_component(App)]
pub fn app() -> Html {
  let site = use_memo((), |_| Site::load());
  let site = (*site).clone();
  let basename = {
    let base = normalize_base(
      &site.cfg.base_path
    );
    (!base.is_empty())
      .then(|| base.to_string())
  };

  html! {
      <ContextProvider<Site> context={site}>
          <BrowserRouter basename={basename}>
              <Switch<AppRoute> render={switch} />
          </BrowserRouter>
      </ContextProvider<Site>>
  }
}

fn switch(route: AppRoute) -> Html {
  html! { <Gate route={route} /> }
}

#[derive(Properties, PartialEq)]
struct GateProps {
  route: AppRoute
}

/// Every route renders through here:
/// the access gate runs once per
/// navigation before anything shows.
#[function_component(Gate)]
fn gate(props: &GateProps) -> Html {
  let site = use_site();
  let location = use_location();
  let navigator = use_navigator();
  let revision = use_state(|| 0u32);

  let path = location
    .as_ref()
    .map(|loc| loc.path().to_string())
    .unwrap_or_default();
  let query = location
    .as_ref()
    .map(|loc| {
      loc.query_str().to_string()
    })
    .unwrap_or_default();

  let view = {
    let site = site.clone();
    use_memo(
      (
        props.route.clone(),
        path,
        query,
        *revision
      ),
      move |(route, path, query, _)| {
        resolve_view(
          &site, route, path, query
        )
      }
    )
  };

  {
    let navigator = navigator.clone();
    use_effect_with(
      view.clone(),
      move |view| {
        if let View::Redirect(target) =
          &**view
          && let Some(navigator) =
            navigator
        {
          tracing::info!(?target, "redirecting");
          navigator.replace(target);
        }
        || ()
      }
    );
  }

  let on_exit_admin = {
    let revision = revision.clone();
    Callback::from(move |_| {
      let mut session = Session::new(
        LocalStorageSession::open()
      );
      session.revoke_admin();
      tracing::info!("left admin mode");
      if let Some(navigator) = &navigator
      {
        navigator
          .replace(&AppRoute::Selector);
      }
      revision.set(
        (*revision).wrapping_add(1)
      );
    })
  };

  match &*view {
    | View::Selector(cards) => html! {
        <SelectorPage cards={cards.clone()} {on_exit_admin} />
    },
    | View::Invitation(record) => html! {
        <InvitationPage key={record.id.clone()} record={record.clone()} />
    },
    | View::Notice {
      title,
      message,
      home_link
    } => html! {
        <Notice
            title={*title}
            message={message.clone()}
            home_link={*home_link}
        />
    },
    | View::Redirect(_) => html! {}
  }
}

fn resolve_view(
  site: &Site,
  route: &AppRoute,
  path: &str,
  query: &str
) -> View {
  let route = match route {
    | AppRoute::Selector => {
      Route::Selector
    }
    | AppRoute::MissingId => {
      Route::Invitation { id: None }
    }
    | AppRoute::Invitation { id } => {
      Route::invitation(id.clone())
    }
    | AppRoute::Other => Route::parse(
      path,
      &site.cfg.base_path
    )
  };
  let admin =
    query_param(query, ADMIN_QUERY_PARAM);

  let gate = AccessGate::new(
    site.cfg.admin_key.clone()
  );
  let mut session = Session::new(
    LocalStorageSession::open()
  );

  View::from_outcome(
    PageOutcome::resolve(
      &site.store,
      &gate,
      &mut session,
      &route,
      admin.as_deref(),
      &site.cfg.base_path
    )
  )
}
