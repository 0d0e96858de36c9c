//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Pages under a guard read the verified principal from `GuardedSession`
//! context; none of them touch credentials directly.

pub mod admin;
pub mod bookings;
pub mod home;
pub mod login;
pub mod provider;
