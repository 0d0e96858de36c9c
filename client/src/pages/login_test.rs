use super::*;

#[test]
fn heading_differs_per_kind() {
    let headings: std::collections::HashSet<_> = PrincipalKind::ALL.into_iter().map(login_heading).collect();
    assert_eq!(headings.len(), 3);
}

#[test]
fn other_logins_excludes_current_kind() {
    let links = other_logins(PrincipalKind::Admin);
    let routes: Vec<_> = links.iter().map(|(href, _)| *href).collect();
    assert_eq!(routes, vec!["/login", "/service-provider/login"]);
}
