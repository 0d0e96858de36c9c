//! # client
//!
//! Leptos + WASM front end for the Wayfare travel marketplace (hotels,
//! vehicle rentals, tour guides).
//!
//! Every protected route is wrapped in [`components::route_guard::RouteGuard`],
//! which re-verifies the visitor's stored token on each navigation using the
//! `guard` crate. Pages themselves are thin: they read the verified principal
//! from context and render.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
