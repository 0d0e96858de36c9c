//! Session and role gate shared by the browser client and the CLI.
//!
//! This crate owns everything that decides whether a visitor may see a
//! protected route: which principal kinds exist, where each kind keeps its
//! credential, how a stored token is verified against the backend, and the
//! `Pending -> Authenticated | Unauthenticated` state machine that results.
//!
//! It is UI-free and runtime-free so the same logic runs inside the Leptos
//! hydrate bundle (`wasm32`) and in native binaries. Storage and HTTP are
//! injected through the [`KeyValueStore`] and [`Transport`] traits.

pub mod error;
pub mod kind;
pub mod login;
pub mod principal;
pub mod route_guard;
pub mod store;
pub mod verify;

pub use error::GuardError;
pub use kind::{GuardSpec, PrincipalKind, ProviderType, RouteAccess};
pub use login::{LoginError, LoginRequest, complete_login, parse_login_reply, validate_login_input};
pub use principal::{AuthState, Credential, GuardView, Principal};
pub use route_guard::{CancelHandle, RouteGuard};
pub use store::{CredentialStore, KeyValueStore, KeyedStore, MemoryStore, StoreError};
pub use verify::{HttpReply, Transport, TransportError, DEFAULT_VERIFY_TIMEOUT};
