//! Public landing page.

use guard::{PrincipalKind, ProviderType};
use leptos::prelude::*;

#[component]
pub fn HomePage() -> impl IntoView {
    let providers = ProviderType::ALL
        .into_iter()
        .map(|t| view! { <li><a href=t.dashboard_route()>{t.as_str()}</a></li> })
        .collect_view();

    view! {
        <main class="home-page">
            <h1>"Wayfare"</h1>
            <p>"Hotels, vehicle rentals, and tour guides in one place."</p>
            <nav class="home-page__entry">
                <a href=PrincipalKind::User.home_route(None)>"My bookings"</a>
                <a href=PrincipalKind::User.spec().login_route>"Sign in"</a>
                <a href=PrincipalKind::Admin.spec().login_route>"Admin"</a>
                <a href=PrincipalKind::Provider.spec().login_route>"For providers"</a>
            </nav>
            <ul class="home-page__providers">{providers}</ul>
        </main>
    }
}
