//! Root application component with routing and context providers.

use guard::{PrincipalKind, ProviderType, RouteAccess};
use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::route_guard::RouteGuard;
use crate::pages::{
    admin::AdminDashboardPage, bookings::BookingsPage, home::HomePage, login::LoginPage,
    provider::ProviderDashboardPage,
};
use crate::state::session::SessionRevision;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the session revision and sets up client-side routing. Every
/// protected route is wrapped in a `RouteGuard` naming the access it needs.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let revision = SessionRevision::new();
    provide_context(revision);

    // Another tab logging in or out changes what our guards should see.
    #[cfg(feature = "hydrate")]
    {
        let _storage = window_event_listener(leptos::ev::storage, move |ev| {
            if crate::state::session::is_credential_key(ev.key().as_deref()) {
                revision.bump();
            }
        });
    }

    view! {
        <Stylesheet id="leptos" href="/pkg/wayfare.css"/>
        <Title text="Wayfare"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=HomePage/>

                <Route path=StaticSegment("login") view=|| view! { <LoginPage kind=PrincipalKind::User/> }/>
                <Route
                    path=(StaticSegment("admin"), StaticSegment("login"))
                    view=|| view! { <LoginPage kind=PrincipalKind::Admin/> }
                />
                <Route
                    path=(StaticSegment("service-provider"), StaticSegment("login"))
                    view=|| view! { <LoginPage kind=PrincipalKind::Provider/> }
                />

                <Route
                    path=StaticSegment("bookings")
                    view=|| view! { <RouteGuard access=RouteAccess::user()><BookingsPage/></RouteGuard> }
                />
                <Route
                    path=(StaticSegment("admin"), StaticSegment("dashboard"))
                    view=|| view! { <RouteGuard access=RouteAccess::admin()><AdminDashboardPage/></RouteGuard> }
                />
                <Route
                    path=(StaticSegment("service-provider"), StaticSegment("hotel"))
                    view=|| provider_route(ProviderType::HotelProvider)
                />
                <Route
                    path=(StaticSegment("service-provider"), StaticSegment("tour-guide"))
                    view=|| provider_route(ProviderType::TourGuide)
                />
                <Route
                    path=(StaticSegment("service-provider"), StaticSegment("vehicle"))
                    view=|| provider_route(ProviderType::VehicleProvider)
                />
            </Routes>
        </Router>
    }
}

fn provider_route(provider_type: ProviderType) -> impl IntoView {
    view! {
        <RouteGuard access=RouteAccess::provider_of(provider_type)>
            <ProviderDashboardPage provider_type=provider_type/>
        </RouteGuard>
    }
}
