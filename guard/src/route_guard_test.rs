use super::*;
use std::cell::{Cell, RefCell};

use futures::channel::oneshot;
use futures::executor::block_on;
use futures::future::FutureExt;

use crate::kind::{PrincipalKind, ProviderType};
use crate::principal::GuardView;
use crate::store::{KeyedStore, MemoryStore};
use crate::verify::{HttpReply, TransportError};

// =========================================================================
// MockTransport
// =========================================================================

struct MockTransport {
    reply: Result<HttpReply, TransportError>,
    calls: RefCell<Vec<(String, String)>>,
}

impl MockTransport {
    fn replying(status: u16, body: &str) -> Self {
        Self { reply: Ok(HttpReply { status, body: body.to_owned() }), calls: RefCell::new(Vec::new()) }
    }

    fn failing(err: TransportError) -> Self {
        Self { reply: Err(err), calls: RefCell::new(Vec::new()) }
    }

    fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for MockTransport {
    async fn get_with_bearer(&self, path: &str, token: &str) -> Result<HttpReply, TransportError> {
        self.calls.borrow_mut().push((path.to_owned(), token.to_owned()));
        self.reply.clone()
    }
}

/// Transport that waits for the test to hand it a reply.
struct DeferredTransport {
    rx: RefCell<Option<oneshot::Receiver<HttpReply>>>,
    started: Cell<bool>,
}

#[async_trait::async_trait(?Send)]
impl Transport for DeferredTransport {
    async fn get_with_bearer(&self, _path: &str, _token: &str) -> Result<HttpReply, TransportError> {
        self.started.set(true);
        let rx = self.rx.borrow_mut().take().ok_or(TransportError::Cancelled)?;
        rx.await.map_err(|_| TransportError::Cancelled)
    }
}

fn store(items: &[(&'static str, &'static str)]) -> KeyedStore<MemoryStore> {
    KeyedStore::new(MemoryStore::with_items(items.iter().copied()))
}

// =========================================================================
// no credential
// =========================================================================

#[test]
fn missing_credential_redirects_without_network_for_every_kind() {
    for kind in PrincipalKind::ALL {
        let store = store(&[]);
        let transport = MockTransport::replying(200, "{}");
        let guard = RouteGuard::new(&store, &transport, RouteAccess { kind, subtype: None });

        let state = block_on(guard.resolve());
        assert_eq!(state, AuthState::Unauthenticated);
        assert_eq!(transport.call_count(), 0);
        assert_eq!(
            state.view(kind),
            GuardView::Redirect { to: kind.spec().login_route, replace: true }
        );
    }
}

#[test]
fn missing_credential_reports_no_credential() {
    let store = store(&[]);
    let transport = MockTransport::replying(200, "{}");
    let guard = RouteGuard::new(&store, &transport, RouteAccess::user());
    assert_eq!(block_on(guard.check()), Err(GuardError::NoCredential));
}

// =========================================================================
// successful verification
// =========================================================================

#[test]
fn user_token_verified_renders_content_and_leaves_store_alone() {
    let store = store(&[("token", "abc"), ("user", r#"{"_id":"u1","name":"Ravi"}"#)]);
    let before = store.backend().snapshot();
    let transport = MockTransport::replying(200, "{}");
    let guard = RouteGuard::new(&store, &transport, RouteAccess::user());

    let state = block_on(guard.resolve());
    let AuthState::Authenticated(principal) = &state else {
        panic!("expected authenticated, got {state:?}");
    };
    assert_eq!(principal.display_name.as_deref(), Some("Ravi"));
    assert_eq!(store.backend().snapshot(), before);
}

#[test]
fn loosely_shaped_principals_verify_without_touching_store() {
    let cases = [
        (
            RouteAccess::provider_of(ProviderType::HotelProvider),
            ("providerToken", "p-tok"),
            r#"{"provider":{"_id":"p1","name":"Sea View","username":"seaview","providerType":"HotelProvider"}}"#,
        ),
        (
            RouteAccess::provider_of(ProviderType::TourGuide),
            ("providerToken", "p-tok"),
            r#"{"provider":{"_id":"p2","id":"p2","providerType":"TourGuide"}}"#,
        ),
        (RouteAccess::admin(), ("adminToken", "a-tok"), r#"{"message":"ok","admin":{"id":7}}"#),
    ];
    for (access, credential, body) in cases {
        let store = store(&[credential]);
        let before = store.backend().snapshot();
        let transport = MockTransport::replying(200, body);
        let guard = RouteGuard::new(&store, &transport, access);

        let state = block_on(guard.resolve());
        assert!(matches!(state, AuthState::Authenticated(_)), "{body}: {state:?}");
        assert_eq!(store.backend().snapshot(), before, "{body}");
    }
}

#[test]
fn bearer_token_is_sent_to_kind_endpoint() {
    let cases = [
        (PrincipalKind::User, "token", "/api/bookings/verify-token", "{}"),
        (PrincipalKind::Admin, "adminToken", "/api/verify-admin-token", r#"{"message":"ok"}"#),
        (
            PrincipalKind::Provider,
            "providerToken",
            "/api/verify-provider-token",
            r#"{"message":"ok","provider":{"providerType":"HotelProvider"}}"#,
        ),
    ];
    for (kind, key, endpoint, body) in cases {
        let store = store(&[(key, "tok-1")]);
        let transport = MockTransport::replying(200, body);
        let guard = RouteGuard::new(&store, &transport, RouteAccess { kind, subtype: None });

        assert!(block_on(guard.check()).is_ok(), "{kind} should verify");
        assert_eq!(*transport.calls.borrow(), vec![(endpoint.to_owned(), "tok-1".to_owned())]);
    }
}

#[test]
fn provider_with_matching_subtype_is_authenticated() {
    let store = store(&[("providerToken", "xyz")]);
    let transport = MockTransport::replying(200, r#"{"provider":{"_id":"p1","providerType":"TourGuide"}}"#);
    let guard = RouteGuard::new(&store, &transport, RouteAccess::provider_of(ProviderType::TourGuide));

    let principal = block_on(guard.check()).unwrap();
    assert_eq!(principal.provider_type, Some(ProviderType::TourGuide));
    assert!(store.backend().contains_key("providerToken"));
}

#[test]
fn remounting_with_valid_credential_is_stable() {
    let store = store(&[("adminToken", "good")]);
    let transport = MockTransport::replying(200, r#"{"message":"ok"}"#);

    for _ in 0..5 {
        let guard = RouteGuard::new(&store, &transport, RouteAccess::admin());
        assert!(matches!(block_on(guard.resolve()), AuthState::Authenticated(_)));
    }
    assert_eq!(transport.call_count(), 5);
    assert!(store.backend().contains_key("adminToken"));
}

// =========================================================================
// revocation
// =========================================================================

#[test]
fn expired_admin_token_is_revoked_and_redirected() {
    let store = store(&[("adminToken", "expired"), ("admin", r#"{"name":"Root"}"#), ("token", "u")]);
    let transport = MockTransport::replying(401, r#"{"message":"jwt expired"}"#);
    let guard = RouteGuard::new(&store, &transport, RouteAccess::admin());

    assert_eq!(block_on(guard.check()), Err(GuardError::VerificationRejected { status: 401 }));
    assert!(!store.backend().contains_key("adminToken"));
    assert!(!store.backend().contains_key("admin"));
    assert!(store.backend().contains_key("token"), "other kinds untouched");
}

#[test]
fn provider_subtype_mismatch_revokes_valid_token() {
    let store = store(&[("providerToken", "xyz"), ("provider", r#"{"providerType":"HotelProvider"}"#)]);
    let transport = MockTransport::replying(200, r#"{"message":"ok","provider":{"providerType":"HotelProvider"}}"#);
    let guard = RouteGuard::new(&store, &transport, RouteAccess::provider_of(ProviderType::TourGuide));

    let state = block_on(guard.resolve());
    assert_eq!(
        state.view(PrincipalKind::Provider),
        GuardView::Redirect { to: "/service-provider/login", replace: true }
    );
    assert!(store.backend().snapshot().is_empty());
}

#[test]
fn network_failure_revokes_like_a_rejection() {
    let store = store(&[("token", "abc"), ("user", "{}")]);
    let transport = MockTransport::failing(TransportError::Network("connection refused".to_owned()));
    let guard = RouteGuard::new(&store, &transport, RouteAccess::user());

    let err = block_on(guard.check()).unwrap_err();
    assert_eq!(err.code(), "E_NETWORK_FAILURE");
    assert!(store.backend().snapshot().is_empty());
}

#[test]
fn malformed_body_revokes() {
    let store = store(&[("providerToken", "xyz")]);
    let transport = MockTransport::replying(200, "not json");
    let guard = RouteGuard::new(&store, &transport, RouteAccess::provider());

    assert_eq!(block_on(guard.resolve()), AuthState::Unauthenticated);
    assert!(!store.backend().contains_key("providerToken"));
}

#[test]
fn transport_cancellation_keeps_credential() {
    let store = store(&[("token", "abc")]);
    let transport = MockTransport::failing(TransportError::Cancelled);
    let guard = RouteGuard::new(&store, &transport, RouteAccess::user());

    let (_handle, verification) = guard.cancellable();
    assert_eq!(block_on(verification), None);
    assert!(store.backend().contains_key("token"));
}

// =========================================================================
// cancellation
// =========================================================================

#[test]
fn cancellable_yields_terminal_state_when_not_cancelled() {
    let store = store(&[("token", "abc")]);
    let transport = MockTransport::replying(200, "{}");
    let (handle, verification) = RouteGuard::new(&store, &transport, RouteAccess::user()).cancellable();

    assert!(matches!(block_on(verification), Some(AuthState::Authenticated(_))));
    assert!(!handle.is_cancelled());
}

#[test]
fn cancel_before_start_skips_network_and_store() {
    let store = store(&[("token", "abc")]);
    let transport = MockTransport::replying(401, "");
    let (handle, verification) = RouteGuard::new(&store, &transport, RouteAccess::user()).cancellable();

    handle.cancel();
    assert!(handle.is_cancelled());
    assert_eq!(block_on(verification), None);
    assert_eq!(transport.call_count(), 0);
    assert!(store.backend().contains_key("token"));
}

#[test]
fn late_rejection_after_cancel_is_ignored() {
    let store = store(&[("adminToken", "expired")]);
    let (tx, rx) = oneshot::channel();
    let transport = DeferredTransport { rx: RefCell::new(Some(rx)), started: Cell::new(false) };
    let (handle, verification) = RouteGuard::new(&store, &transport, RouteAccess::admin()).cancellable();
    let mut verification = Box::pin(verification);

    // First poll issues the request and parks on the reply.
    assert!(verification.as_mut().now_or_never().is_none());
    assert!(transport.started.get());

    handle.cancel();
    tx.send(HttpReply { status: 401, body: String::new() }).unwrap();

    assert_eq!(block_on(verification), None);
    assert!(store.backend().contains_key("adminToken"), "cancelled view must not revoke");
}

#[test]
fn cancel_handle_clones_share_state() {
    let store = store(&[]);
    let transport = MockTransport::replying(200, "{}");
    let (handle, _verification) = RouteGuard::new(&store, &transport, RouteAccess::user()).cancellable();
    let clone = handle.clone();
    clone.cancel();
    assert!(handle.is_cancelled());
}
