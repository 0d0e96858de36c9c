//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Browser storage and auth redirect helpers, kept apart from page and
//! component code.

pub mod auth;
pub mod storage;
