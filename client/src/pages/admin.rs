//! Marketplace administration dashboard (admin-only).

use leptos::prelude::*;

use crate::components::session_bar::SessionBar;

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    view! {
        <div class="admin-page">
            <SessionBar title="Administration"/>
            <section class="admin-page__overview">
                <p>"Review providers, listings, and bookings."</p>
            </section>
        </div>
    }
}
