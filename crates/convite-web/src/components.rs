mod calendar;
mod countdown;
mod dress_code;
mod escorts;
mod footer;
mod gallery;
mod hashtag;
mod header;
mod highlight;
mod modal;
mod music_player;
mod parents;
mod registry;
mod rsvp;
mod section_frame;
mod timeline;
mod venues;

pub use calendar::EventCalendar;
pub use countdown::Countdown;
pub use dress_code::DressCode;
pub use escorts::Escorts;
pub use footer::Footer;
pub use gallery::Gallery;
pub use hashtag::Hashtag;
pub use header::Header;
pub use highlight::HighlightPanel;
pub use modal::Modal;
pub use music_player::MusicPlayer;
pub use parents::Parents;
pub use registry::GiftRegistry;
pub use rsvp::Rsvp;
pub use section_frame::SectionFrame;
pub use timeline::Timeline;
pub use venues::{
  VenueCard,
  Venues
};
