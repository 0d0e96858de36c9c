//! Route guard component wrapping every protected page.
//!
//! ARCHITECTURE
//! ============
//! Each mount owns an `RwSignal<AuthState>` that starts at `Pending`. A
//! hydrate-only effect starts one cancellable verification per run and
//! settles the signal with its result. Runs are triggered by mount, by a
//! change of the required access, and by a [`SessionRevision`] bump.
//!
//! LIFECYCLE
//! =========
//! A rerun cancels the previous verification before starting over at
//! `Pending`; disposal cancels the in-flight one. A cancelled verification
//! never revokes and never writes to the (possibly disposed) signal.

#[cfg(test)]
#[path = "route_guard_test.rs"]
mod route_guard_test;

use guard::{AuthState, CancelHandle, RouteAccess};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::session::{GuardedSession, SessionRevision};
use crate::util::auth::install_unauth_redirect;

/// Start a verification run: cancel the previous one, reset to `Pending`,
/// and remember `handle` as the one in flight.
#[cfg(any(test, feature = "hydrate"))]
fn begin_run(state: RwSignal<AuthState>, in_flight: StoredValue<Option<CancelHandle>>, handle: CancelHandle) {
    if let Some(previous) = in_flight.get_value() {
        previous.cancel();
    }
    state.set(AuthState::Pending);
    in_flight.set_value(Some(handle));
}

/// Apply a run's outcome. `None` (cancelled) leaves the state alone, and a
/// disposed signal is skipped.
#[cfg(any(test, feature = "hydrate"))]
fn finish_run(state: RwSignal<AuthState>, outcome: Option<AuthState>) {
    if let Some(next) = outcome {
        let _ = state.try_update(|s| s.settle(next));
    }
}

fn cancel_in_flight(in_flight: StoredValue<Option<CancelHandle>>) {
    if let Some(handle) = in_flight.try_get_value().flatten() {
        handle.cancel();
    }
}

/// Render `children` only for a visitor whose stored credential verifies
/// for `access`; otherwise redirect to the kind's login route.
#[component]
pub fn RouteGuard(#[prop(into)] access: Signal<RouteAccess>, children: ChildrenFn) -> impl IntoView {
    let revision = expect_context::<SessionRevision>();
    let state = RwSignal::new(AuthState::Pending);
    let in_flight = StoredValue::new(None::<CancelHandle>);
    let kind = Signal::derive(move || access.get().kind);

    provide_context(GuardedSession { kind: kind.get_untracked(), state });
    install_unauth_redirect(state, kind, use_navigate());

    #[cfg(feature = "hydrate")]
    Effect::new(move || {
        let _ = revision.track();
        let access = access.get();

        let guard = guard::RouteGuard::new(
            crate::util::storage::browser_store(),
            crate::net::transport::BrowserTransport::default(),
            access,
        );
        let (handle, verification) = guard.cancellable();
        begin_run(state, in_flight, handle);
        leptos::task::spawn_local(async move {
            finish_run(state, verification.await);
        });
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = revision;

    on_cleanup(move || cancel_in_flight(in_flight));

    move || match state.get() {
        AuthState::Authenticated(_) => children().into_any(),
        AuthState::Pending | AuthState::Unauthenticated => view! {
            <div class="route-guard__loading" aria-busy="true">
                <span class="route-guard__spinner"></span>
            </div>
        }
        .into_any(),
    }
}
