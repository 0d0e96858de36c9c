//! Session-wide reactive state.
//!
//! SYSTEM CONTEXT
//! ==============
//! `localStorage` is not reactive, so anything that changes stored
//! credentials (login, logout, another tab) bumps [`SessionRevision`].
//! Route guards track the revision and re-verify when it moves.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use guard::{AuthState, CredentialStore, PrincipalKind, Principal};
use leptos::prelude::*;

use crate::util::storage::browser_store;

/// Monotonic counter bumped whenever stored credentials change.
#[derive(Clone, Copy, Debug)]
pub struct SessionRevision(RwSignal<u64>);

impl SessionRevision {
    #[must_use]
    pub fn new() -> Self {
        Self(RwSignal::new(0))
    }

    /// Subscribe the current reactive scope and return the revision.
    #[must_use]
    pub fn track(self) -> u64 {
        self.0.get()
    }

    pub fn bump(self) {
        self.0.update(|rev| *rev = rev.wrapping_add(1));
    }
}

impl Default for SessionRevision {
    fn default() -> Self {
        Self::new()
    }
}

/// Provided by a route guard to the content it wraps.
#[derive(Clone, Copy, Debug)]
pub struct GuardedSession {
    pub kind: PrincipalKind,
    pub state: RwSignal<AuthState>,
}

impl GuardedSession {
    /// Verified principal, if the guard has let the visitor through.
    #[must_use]
    pub fn principal(&self) -> Option<Principal> {
        match self.state.get() {
            AuthState::Authenticated(principal) => Some(principal),
            AuthState::Pending | AuthState::Unauthenticated => None,
        }
    }
}

/// Whether a `storage` event for `key` concerns credentials.
///
/// `None` means the other tab called `localStorage.clear()`.
#[must_use]
pub fn is_credential_key(key: Option<&str>) -> bool {
    let Some(key) = key else {
        return true;
    };
    PrincipalKind::ALL
        .into_iter()
        .map(PrincipalKind::spec)
        .any(|spec| spec.token_key == key || spec.principal_key == key)
}

/// Drop the stored credential for `kind` and notify guards.
pub fn logout(kind: PrincipalKind, revision: SessionRevision) {
    if let Err(e) = browser_store().clear(kind) {
        #[cfg(feature = "hydrate")]
        log::warn!("logout: failed to clear {kind} credential: {e}");
        #[cfg(not(feature = "hydrate"))]
        let _ = e;
    }
    revision.bump();
}
