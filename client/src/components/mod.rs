//! Reusable UI components.

pub mod route_guard;
pub mod session_bar;
