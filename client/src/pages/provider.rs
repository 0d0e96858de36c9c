//! Provider dashboards, one route per provider subtype.

#[cfg(test)]
#[path = "provider_test.rs"]
mod provider_test;

use guard::ProviderType;
use leptos::prelude::*;

use crate::components::session_bar::SessionBar;

fn dashboard_title(provider_type: ProviderType) -> &'static str {
    match provider_type {
        ProviderType::HotelProvider => "Hotel dashboard",
        ProviderType::TourGuide => "Tour guide dashboard",
        ProviderType::VehicleProvider => "Vehicle rental dashboard",
    }
}

fn listing_noun(provider_type: ProviderType) -> &'static str {
    match provider_type {
        ProviderType::HotelProvider => "rooms",
        ProviderType::TourGuide => "tours",
        ProviderType::VehicleProvider => "vehicles",
    }
}

#[component]
pub fn ProviderDashboardPage(provider_type: ProviderType) -> impl IntoView {
    view! {
        <div class="provider-page">
            <SessionBar title=dashboard_title(provider_type)/>
            <section class="provider-page__listings">
                <p>{format!("Manage your {} and incoming bookings.", listing_noun(provider_type))}</p>
            </section>
        </div>
    }
}
