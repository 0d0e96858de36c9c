//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! Per-route auth state lives in each guard; only the cross-route session
//! revision is app-wide.

pub mod session;
