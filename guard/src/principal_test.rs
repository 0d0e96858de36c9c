use super::*;

#[test]
fn blank_token_is_not_a_credential() {
    assert!(Credential::new(PrincipalKind::User, "").is_none());
    assert!(Credential::new(PrincipalKind::User, "   ").is_none());
    assert_eq!(
        Credential::new(PrincipalKind::Admin, "abc"),
        Some(Credential { token: "abc".to_owned(), kind: PrincipalKind::Admin })
    );
}

#[test]
fn principal_accepts_mongo_style_ids_and_name_aliases() {
    let principal: Principal =
        serde_json::from_value(serde_json::json!({ "_id": "64f0", "username": "maya", "email": "m@x.io" })).unwrap();
    assert_eq!(principal.id.as_deref(), Some("64f0"));
    assert_eq!(principal.display_name.as_deref(), Some("maya"));
    assert_eq!(principal.extra.get("email"), Some(&serde_json::json!("m@x.io")));
}

#[test]
fn principal_reads_provider_type() {
    let principal: Principal =
        serde_json::from_value(serde_json::json!({ "id": "p1", "providerType": "VehicleProvider" })).unwrap();
    assert_eq!(principal.provider_type, Some(ProviderType::VehicleProvider));
}

#[test]
fn principal_keeps_unknown_provider_type_in_extra() {
    let principal: Principal = serde_json::from_value(serde_json::json!({ "providerType": "Chef" })).unwrap();
    assert_eq!(principal.provider_type, None);
    assert_eq!(principal.unrecognized_provider_type(), Some(&serde_json::json!("Chef")));
}

#[test]
fn principal_takes_first_id_when_both_id_keys_present() {
    let principal: Principal = serde_json::from_value(serde_json::json!({ "_id": "mongo", "id": "plain" })).unwrap();
    assert_eq!(principal.id.as_deref(), Some("plain"));
    assert_eq!(principal.extra.get("_id"), Some(&serde_json::json!("mongo")));
}

#[test]
fn principal_accepts_numeric_id() {
    let principal: Principal = serde_json::from_value(serde_json::json!({ "id": 7 })).unwrap();
    assert_eq!(principal.id.as_deref(), Some("7"));
}

#[test]
fn principal_takes_first_of_several_name_aliases() {
    let principal: Principal =
        serde_json::from_value(serde_json::json!({ "username": "seaview", "name": "Sea View" })).unwrap();
    assert_eq!(principal.display_name.as_deref(), Some("Sea View"));
    assert_eq!(principal.extra.get("username"), Some(&serde_json::json!("seaview")));
}

#[test]
fn principal_skips_unusable_alias_values() {
    let principal: Principal =
        serde_json::from_value(serde_json::json!({ "id": null, "_id": "p1", "name": "", "fullName": "Ana Silva" }))
            .unwrap();
    assert_eq!(principal.id.as_deref(), Some("p1"));
    assert_eq!(principal.display_name.as_deref(), Some("Ana Silva"));
    assert!(!principal.extra.contains_key("id"));
}

#[test]
fn principal_round_trips_through_cache_encoding() {
    let principal: Principal = serde_json::from_value(
        serde_json::json!({ "_id": 12, "name": "Sea View", "username": "seaview", "providerType": "HotelProvider" }),
    )
    .unwrap();
    let cached: Principal = serde_json::from_str(&serde_json::to_string(&principal).unwrap()).unwrap();
    assert_eq!(cached, principal);
}

#[test]
fn principal_from_non_object_is_an_error() {
    assert!(serde_json::from_value::<Principal>(serde_json::json!("p1")).is_err());
}

#[test]
fn principal_label_falls_back_to_id_then_generic() {
    let named = Principal { display_name: Some("Ana".to_owned()), ..Principal::default() };
    let id_only = Principal { id: Some("u9".to_owned()), ..Principal::default() };
    assert_eq!(named.label(), "Ana");
    assert_eq!(id_only.label(), "u9");
    assert_eq!(Principal::default().label(), "signed in");
}

#[test]
fn auth_state_defaults_to_pending() {
    assert_eq!(AuthState::default(), AuthState::Pending);
}

#[test]
fn settle_leaves_pending_once() {
    let mut state = AuthState::Pending;
    assert!(state.settle(AuthState::Unauthenticated));
    assert!(!state.settle(AuthState::Authenticated(Principal::default())));
    assert_eq!(state, AuthState::Unauthenticated);
}

#[test]
fn settle_ignores_transition_back_to_pending() {
    let mut state = AuthState::Pending;
    assert!(!state.settle(AuthState::Pending));
    assert!(state.is_pending());

    let mut done = AuthState::Authenticated(Principal::default());
    assert!(!done.settle(AuthState::Pending));
    assert!(matches!(done, AuthState::Authenticated(_)));
}

#[test]
fn view_maps_each_state() {
    let principal = Principal::default();
    assert_eq!(AuthState::Pending.view(PrincipalKind::User), GuardView::Loading);
    assert_eq!(
        AuthState::Authenticated(principal.clone()).view(PrincipalKind::User),
        GuardView::Content(&principal)
    );
    assert_eq!(
        AuthState::Unauthenticated.view(PrincipalKind::Admin),
        GuardView::Redirect { to: "/admin/login", replace: true }
    );
    assert_eq!(
        AuthState::Unauthenticated.view(PrincipalKind::Provider),
        GuardView::Redirect { to: "/service-provider/login", replace: true }
    );
}
