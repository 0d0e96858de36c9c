//! The route guard: stored credential + live verification -> auth state.
//!
//! ARCHITECTURE
//! ============
//! One guard instance corresponds to one mount of a protected route. It reads
//! the credential for its kind, verifies it once, and settles. There are no
//! retries and nothing is cached between mounts; every navigation starts over
//! at `Pending`.
//!
//! CANCELLATION
//! ============
//! [`RouteGuard::cancellable`] wraps the verification in an abortable future.
//! Once the owning view is disposed and the handle fired, the future yields
//! `None` at its next poll, so a late reply neither revokes the credential nor
//! touches view state.

#[cfg(test)]
#[path = "route_guard_test.rs"]
mod route_guard_test;

use std::future::Future;

use futures::future::{AbortHandle, Abortable};

use crate::error::GuardError;
use crate::kind::RouteAccess;
use crate::principal::{AuthState, Principal};
use crate::store::CredentialStore;
use crate::verify::{Transport, classify};

pub struct RouteGuard<S, T> {
    store: S,
    transport: T,
    access: RouteAccess,
}

impl<S: CredentialStore, T: Transport> RouteGuard<S, T> {
    pub fn new(store: S, transport: T, access: RouteAccess) -> Self {
        Self { store, transport, access }
    }

    /// Verify the stored credential for this route.
    ///
    /// With nothing stored this returns immediately without touching the
    /// network. Any revoking failure wipes the kind's credential and cached
    /// principal before returning.
    ///
    /// # Errors
    ///
    /// Returns the [`GuardError`] explaining why access is denied.
    pub async fn check(&self) -> Result<Principal, GuardError> {
        let kind = self.access.kind;
        let Some(credential) = self.store.get(kind) else {
            tracing::debug!(%kind, "no stored credential");
            return Err(GuardError::NoCredential);
        };

        let endpoint = kind.spec().verify_endpoint;
        tracing::debug!(%kind, endpoint, subtype = ?self.access.required_subtype(), "verifying stored credential");

        let verdict = match self.transport.get_with_bearer(endpoint, &credential.token).await {
            Ok(reply) => classify(&self.access, &reply, self.store.cached_principal(kind)),
            Err(e) => Err(e.into()),
        };

        match &verdict {
            Ok(principal) => {
                tracing::info!(%kind, principal = principal.label(), "credential verified");
            }
            Err(e) if e.revokes() => self.revoke(e),
            Err(e) => tracing::debug!(%kind, code = e.code(), "verification ended without a verdict"),
        }
        verdict
    }

    /// [`check`](Self::check) collapsed to a terminal [`AuthState`].
    pub async fn resolve(&self) -> AuthState {
        match self.check().await {
            Ok(principal) => AuthState::Authenticated(principal),
            Err(_) => AuthState::Unauthenticated,
        }
    }

    /// Consume the guard into a verification task plus a handle to cancel it.
    ///
    /// The future yields `None` when cancelled, either through the handle or
    /// because the transport reported the request as aborted.
    pub fn cancellable(self) -> (CancelHandle, impl Future<Output = Option<AuthState>>) {
        let (handle, registration) = AbortHandle::new_pair();
        let task = Abortable::new(async move { self.check().await }, registration);
        let verification = async move {
            match task.await {
                Err(_aborted) => {
                    tracing::debug!("verification dropped after cancel");
                    None
                }
                Ok(Err(GuardError::Cancelled)) => None,
                Ok(Ok(principal)) => Some(AuthState::Authenticated(principal)),
                Ok(Err(_)) => Some(AuthState::Unauthenticated),
            }
        };
        (CancelHandle { handle }, verification)
    }

    fn revoke(&self, reason: &GuardError) {
        let kind = self.access.kind;
        tracing::warn!(%kind, code = reason.code(), reason = %reason, "revoking stored credential");
        if let Err(e) = self.store.clear(kind) {
            tracing::warn!(%kind, error = %e, "failed to clear revoked credential");
        }
    }
}

/// Cancels an in-flight verification started by [`RouteGuard::cancellable`].
#[derive(Clone, Debug)]
pub struct CancelHandle {
    handle: AbortHandle,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.handle.abort();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.handle.is_aborted()
    }
}
