use super::*;

#[test]
fn token_and_principal_keys_are_credential_keys() {
    for key in ["token", "user", "adminToken", "admin", "providerToken", "provider"] {
        assert!(is_credential_key(Some(key)), "{key}");
    }
}

#[test]
fn unrelated_keys_are_ignored() {
    assert!(!is_credential_key(Some("gauntlet_week_1_dark")));
    assert!(!is_credential_key(Some("cart")));
}

#[test]
fn storage_clear_counts_as_credential_change() {
    assert!(is_credential_key(None));
}

#[test]
fn revision_bump_increments() {
    let owner = Owner::new();
    owner.with(|| {
        let revision = SessionRevision::new();
        assert_eq!(revision.track(), 0);
        revision.bump();
        revision.bump();
        assert_eq!(revision.track(), 2);
    });
}

#[test]
fn guarded_session_exposes_principal_only_when_authenticated() {
    let owner = Owner::new();
    owner.with(|| {
        let state = RwSignal::new(AuthState::Pending);
        let session = GuardedSession { kind: PrincipalKind::User, state };
        assert!(session.principal().is_none());

        let principal = Principal { display_name: Some("Noa".to_owned()), ..Principal::default() };
        state.set(AuthState::Authenticated(principal.clone()));
        assert_eq!(session.principal(), Some(principal));

        state.set(AuthState::Unauthenticated);
        assert!(session.principal().is_none());
    });
}
