pub mod access;
pub mod calendar;
pub mod config;
pub mod countdown;
pub mod datetime;
pub mod error;
pub mod ics;
pub mod lifecycle;
pub mod links;
pub mod page;
pub mod record;
pub mod route;
pub mod sections;
pub mod store;
pub mod timeline;

pub use access::{
  AccessDecision,
  AccessGate,
  AccessState,
  MemorySession,
  Session,
  SessionStore
};
pub use config::SiteConfig;
pub use countdown::{
  CountdownState,
  TimeLeft
};
pub use error::{
  LookupError,
  StoreError
};
pub use page::{
  InvitationSnapshot,
  PageOutcome
};
pub use record::InvitationRecord;
pub use route::Route;
pub use store::InvitationStore;
