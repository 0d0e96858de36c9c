use super::*;
use guard::Principal;

#[test]
fn redirects_unauthenticated_to_kind_login_with_replace() {
    let (to, options) = redirect_target(&AuthState::Unauthenticated, PrincipalKind::Admin).unwrap();
    assert_eq!(to, "/admin/login");
    assert!(options.replace);
}

#[test]
fn does_not_redirect_while_pending() {
    assert!(redirect_target(&AuthState::Pending, PrincipalKind::User).is_none());
}

#[test]
fn does_not_redirect_when_authenticated() {
    let state = AuthState::Authenticated(Principal::default());
    assert!(redirect_target(&state, PrincipalKind::Provider).is_none());
}
