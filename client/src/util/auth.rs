//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Guarded routes must apply identical unauthenticated redirect behavior:
//! once a guard settles on `Unauthenticated`, replace the current history
//! entry with the kind's login route.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use guard::{AuthState, GuardView, PrincipalKind};
use leptos::prelude::*;
use leptos_router::NavigateOptions;

/// Login redirect target for `state`, if it calls for one.
pub fn redirect_target(state: &AuthState, kind: PrincipalKind) -> Option<(&'static str, NavigateOptions)> {
    match state.view(kind) {
        GuardView::Redirect { to, replace } => Some((to, NavigateOptions { replace, ..NavigateOptions::default() })),
        GuardView::Loading | GuardView::Content(_) => None,
    }
}

/// Navigate to the kind's login route whenever `auth` settles unauthenticated.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, kind: Signal<PrincipalKind>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        let state = auth.get();
        if let Some((to, options)) = redirect_target(&state, kind.get_untracked()) {
            navigate(to, options);
        }
    });
}
