//! Networking modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles login calls; `transport` is the fetch-backed verification
//! transport the route guards run on.

pub mod api;
pub mod transport;
