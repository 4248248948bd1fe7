//! Access gate for anonymous visitors.
//!
//! Invitation detail routes are always reachable. Every other route is
//! reserved for admins; anonymous visitors are sent back to the last
//! invitation they opened, or shown a restricted notice if they have none.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::route::Route;

pub const ADMIN_FLAG_KEY: &str = "isAdmin";
pub const LAST_VISITED_KEY: &str = "lastInvitationId";
pub const ADMIN_QUERY_PARAM: &str = "admin";

/// Durable client-local key/value storage.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// In-process storage, for tests and non-browser callers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySession {
    values: BTreeMap<String, String>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySession {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessState {
    AnonymousNoHistory,
    AnonymousWithHistory { last_visited: String },
    Admin,
}

/// Owns the admin flag and the last-visited pointer.
#[derive(Debug, Clone)]
pub struct Session<S: SessionStore> {
    store: S,
}

impl<S: SessionStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn is_admin(&self) -> bool {
        self.store.get(ADMIN_FLAG_KEY).as_deref() == Some("true")
    }

    pub fn last_visited(&self) -> Option<String> {
        self.store
            .get(LAST_VISITED_KEY)
            .filter(|id| !id.trim().is_empty())
    }

    pub fn state(&self) -> AccessState {
        if self.is_admin() {
            AccessState::Admin
        } else if let Some(last_visited) = self.last_visited() {
            AccessState::AnonymousWithHistory { last_visited }
        } else {
            AccessState::AnonymousNoHistory
        }
    }

    pub fn grant_admin(&mut self) {
        self.store.set(ADMIN_FLAG_KEY, "true");
    }

    pub fn revoke_admin(&mut self) {
        self.store.remove(ADMIN_FLAG_KEY);
    }

    pub fn record_visit(&mut self, id: &str) {
        self.store.set(LAST_VISITED_KEY, id);
    }

    /// Back to `AnonymousNoHistory`.
    pub fn reset(&mut self) {
        self.store.remove(ADMIN_FLAG_KEY);
        self.store.remove(LAST_VISITED_KEY);
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Redirect(Route),
    Deny,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessGate {
    admin_key: String,
}

impl AccessGate {
    pub fn new(admin_key: impl Into<String>) -> Self {
        Self {
            admin_key: admin_key.into(),
        }
    }

    fn is_admin_key(&self, presented: Option<&str>) -> bool {
        !self.admin_key.is_empty() && presented == Some(self.admin_key.as_str())
    }

    /// Decides one navigation and updates the session as a side effect:
    /// the admin secret elevates the session, and any detail route with an
    /// id becomes the last-visited invitation.
    #[tracing::instrument(skip(self, session, admin_param))]
    pub fn check<S: SessionStore>(
        &self,
        session: &mut Session<S>,
        route: &Route,
        admin_param: Option<&str>,
    ) -> AccessDecision {
        if self.is_admin_key(admin_param) {
            info!("admin key presented; elevating session");
            session.grant_admin();
        }

        if let Some(id) = route.invitation_id() {
            session.record_visit(id);
        }

        let state = session.state();
        debug!(?state, "evaluating access");

        if route.is_detail() {
            return AccessDecision::Allow;
        }

        match state {
            AccessState::Admin => AccessDecision::Allow,
            AccessState::AnonymousWithHistory { last_visited } => {
                info!(%last_visited, "redirecting anonymous visitor to last invitation");
                AccessDecision::Redirect(Route::invitation(last_visited))
            }
            AccessState::AnonymousNoHistory => {
                info!("denying anonymous visitor without history");
                AccessDecision::Deny
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> AccessGate {
        AccessGate::new("zeus-access")
    }

    #[test]
    fn anonymous_without_history_is_denied_then_redirected() {
        let mut session = Session::new(MemorySession::new());
        assert_eq!(gate().check(&mut session, &Route::Selector, None), AccessDecision::Deny);

        assert_eq!(
            gate().check(&mut session, &Route::invitation("X"), None),
            AccessDecision::Allow
        );
        assert_eq!(
            gate().check(&mut session, &Route::Selector, None),
            AccessDecision::Redirect(Route::invitation("X"))
        );
    }

    #[test]
    fn detail_routes_always_allowed_and_tracked() {
        let mut session = Session::new(MemorySession::new());
        session.grant_admin();
        assert_eq!(
            gate().check(&mut session, &Route::invitation("Y"), None),
            AccessDecision::Allow
        );
        assert_eq!(session.last_visited().as_deref(), Some("Y"));

        let mut anon = Session::new(MemorySession::new());
        assert_eq!(
            gate().check(&mut anon, &Route::Invitation { id: None }, None),
            AccessDecision::Allow
        );
        assert_eq!(anon.state(), AccessState::AnonymousNoHistory);
    }

    #[test]
    fn admin_key_is_sticky_until_revoked() {
        let mut session = Session::new(MemorySession::new());
        assert_eq!(
            gate().check(&mut session, &Route::Selector, Some("wrong")),
            AccessDecision::Deny
        );
        assert_eq!(
            gate().check(&mut session, &Route::Selector, Some("zeus-access")),
            AccessDecision::Allow
        );
        assert_eq!(
            gate().check(&mut session, &Route::Other("/x".to_string()), None),
            AccessDecision::Allow
        );
        assert_eq!(session.store().get(ADMIN_FLAG_KEY).as_deref(), Some("true"));

        session.revoke_admin();
        assert_eq!(gate().check(&mut session, &Route::Selector, None), AccessDecision::Deny);
    }

    #[test]
    fn reset_clears_everything() {
        let mut session = Session::new(MemorySession::new());
        session.grant_admin();
        session.record_visit("Z");
        session.reset();
        assert_eq!(session.state(), AccessState::AnonymousNoHistory);
        assert_eq!(session.into_store(), MemorySession::new());
    }

    #[test]
    fn empty_admin_key_never_elevates() {
        let gate = AccessGate::new("");
        let mut session = Session::new(MemorySession::new());
        assert_eq!(gate.check(&mut session, &Route::Selector, Some("")), AccessDecision::Deny);
        assert!(!session.is_admin());
    }
}
