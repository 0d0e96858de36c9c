//! Login page shared by all three principal kinds.
//!
//! One page parameterized by [`PrincipalKind`]: the kind picks the login
//! endpoint, the storage keys, and where a successful login lands.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use guard::PrincipalKind;
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::session::SessionRevision;

fn login_heading(kind: PrincipalKind) -> &'static str {
    match kind {
        PrincipalKind::User => "Sign in to book",
        PrincipalKind::Admin => "Administrator sign in",
        PrincipalKind::Provider => "Service provider sign in",
    }
}

/// Links to the other two login pages, so a visitor who landed on the wrong
/// one can switch.
fn other_logins(kind: PrincipalKind) -> Vec<(&'static str, &'static str)> {
    PrincipalKind::ALL
        .into_iter()
        .filter(|k| *k != kind)
        .map(|k| (k.spec().login_route, login_heading(k)))
        .collect()
}

#[component]
pub fn LoginPage(kind: PrincipalKind) -> impl IntoView {
    let revision = expect_context::<SessionRevision>();
    let navigate = use_navigate();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (email_value, password_value) = match guard::validate_login_input(&email.get(), &password.get()) {
            Ok(values) => values,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Signing in...".to_owned());

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::login(kind, &email_value, &password_value).await {
                    Ok(principal) => {
                        revision.bump();
                        let home = kind.home_route(principal.provider_type);
                        navigate(home, NavigateOptions { replace: true, ..NavigateOptions::default() });
                    }
                    Err(e) => {
                        info.set(format!("Sign in failed: {e}"));
                        busy.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email_value, password_value, revision, &navigate, NavigateOptions::default());
        }
    };

    let links = other_logins(kind)
        .into_iter()
        .map(|(href, label)| view! { <li><a href=href>{label}</a></li> })
        .collect_view();

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Wayfare"</h1>
                <p class="login-card__subtitle">{login_heading(kind)}</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Sign in"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <div class="login-divider"></div>
                <ul class="login-alternatives">{links}</ul>
            </div>
        </div>
    }
}
