//! Header strip for guarded pages: who is signed in, plus logout.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::session::{GuardedSession, SessionRevision, logout};

#[component]
pub fn SessionBar(#[prop(into)] title: String) -> impl IntoView {
    let session = expect_context::<GuardedSession>();
    let revision = expect_context::<SessionRevision>();
    let navigate = use_navigate();

    let label = move || session.principal().map(|p| p.label().to_owned()).unwrap_or_default();
    let on_logout = move |_| {
        logout(session.kind, revision);
        navigate(session.kind.spec().login_route, NavigateOptions { replace: true, ..NavigateOptions::default() });
    };

    view! {
        <header class="session-bar">
            <h1 class="session-bar__title">{title}</h1>
            <span class="session-bar__who">{label}</span>
            <button class="session-bar__logout" on:click=on_logout>
                "Log out"
            </button>
        </header>
    }
}
