//! What a navigation resolves to, and the render model of one invitation.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::debug;

use crate::access::{AccessDecision, AccessGate, Session, SessionStore};
use crate::calendar::MonthGrid;
use crate::countdown::CountdownState;
use crate::error::LookupError;
use crate::links::LinkSet;
use crate::record::InvitationRecord;
use crate::route::Route;
use crate::sections::{Section, visible_sections};
use crate::store::{InvitationStore, InvitationSummary};
use crate::timeline::TimelineStatus;

#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome<'a> {
    Selector(Vec<InvitationSummary>),
    Invitation(&'a InvitationRecord),
    MissingId,
    NotFound(String),
    Restricted,
    /// Navigate here instead; see [`Route::to_path`].
    Redirect(Route),
}

impl<'a> PageOutcome<'a> {
    /// Routing, gating and lookup for one navigation.
    #[tracing::instrument(skip(store, gate, session, admin_param))]
    pub fn resolve<S: SessionStore>(
        store: &'a InvitationStore,
        gate: &AccessGate,
        session: &mut Session<S>,
        route: &Route,
        admin_param: Option<&str>,
        base_path: &str,
    ) -> Self {
        match gate.check(session, route, admin_param) {
            AccessDecision::Deny => PageOutcome::Restricted,
            AccessDecision::Redirect(target) => PageOutcome::Redirect(target),
            AccessDecision::Allow => match route {
                Route::Invitation { id } => match store.resolve(id.as_deref()) {
                    Ok(record) => PageOutcome::Invitation(record),
                    Err(LookupError::MissingId) => PageOutcome::MissingId,
                    Err(LookupError::UnknownId(id)) => PageOutcome::NotFound(id),
                },
                // Admins reaching an unknown path land on the selector.
                Route::Selector | Route::Other(_) => {
                    PageOutcome::Selector(store.summaries(base_path))
                }
            },
        }
    }

    /// Notice text for outcomes that are not a page.
    pub fn notice(&self) -> Option<String> {
        match self {
            PageOutcome::MissingId => Some("ID no encontrado".to_string()),
            PageOutcome::NotFound(id) => Some(format!("Invitación no encontrada: {id}")),
            PageOutcome::Restricted => Some("Acceso restringido".to_string()),
            _ => None,
        }
    }
}

/// Everything the invitation page shows at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct InvitationSnapshot {
    pub title: String,
    pub event_start: DateTime<Utc>,
    pub countdown: CountdownState,
    pub calendar: MonthGrid,
    pub timeline: TimelineStatus,
    pub current_entry: Option<usize>,
    pub sections: Vec<Section>,
    pub links: LinkSet,
}

impl InvitationSnapshot {
    #[tracing::instrument(skip(record, page_url), fields(id = %record.id))]
    pub fn capture(
        record: &InvitationRecord,
        tz: &Tz,
        now: DateTime<Utc>,
        page_url: &str,
    ) -> Self {
        let event_start = record.event_instant(tz);
        let timeline = TimelineStatus::evaluate(&record.timeline, &now.with_timezone(tz));
        let current_entry = timeline.current_index();
        let countdown = CountdownState::compute(event_start, now);
        debug!(?countdown, ?current_entry, "captured invitation snapshot");

        Self {
            title: record.summary_title(),
            event_start,
            countdown,
            calendar: MonthGrid::for_date(record.event_at.date()),
            timeline,
            current_entry,
            sections: visible_sections(record),
            links: LinkSet::build(record, event_start, page_url),
        }
    }

    /// Recompute only the ticking parts.
    pub fn refresh(&mut self, record: &InvitationRecord, tz: &Tz, now: DateTime<Utc>) {
        self.countdown = CountdownState::compute(self.event_start, now);
        self.timeline = TimelineStatus::evaluate(&record.timeline, &now.with_timezone(tz));
        self.current_entry = self.timeline.current_index();
    }

    pub fn shows(&self, section: Section) -> bool {
        self.sections.contains(&section)
    }
}
