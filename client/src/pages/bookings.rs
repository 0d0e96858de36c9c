//! Traveler bookings overview (user-only).

use leptos::prelude::*;

use crate::components::session_bar::SessionBar;

#[component]
pub fn BookingsPage() -> impl IntoView {
    view! {
        <div class="bookings-page">
            <SessionBar title="My bookings"/>
            <section class="bookings-page__list">
                <p>"Your upcoming stays, rentals, and tours appear here."</p>
            </section>
        </div>
    }
}
