//! Principal kinds and the per-kind guard table.
//!
//! DESIGN
//! ======
//! The three login namespaces (shoppers, administrators, service providers)
//! differ only in data: which endpoint verifies their token, which storage
//! keys hold it, and where an unauthenticated visitor is sent. That data lives
//! in one `const` table so nothing else repeats endpoint or key literals.

#[cfg(test)]
#[path = "kind_test.rs"]
mod kind_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which login namespace a credential belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrincipalKind {
    User,
    Admin,
    Provider,
}

impl PrincipalKind {
    pub const ALL: [Self; 3] = [Self::User, Self::Admin, Self::Provider];

    /// Table row describing endpoints, storage keys, and routes for this kind.
    #[must_use]
    pub const fn spec(self) -> &'static GuardSpec {
        match self {
            Self::User => &USER_SPEC,
            Self::Admin => &ADMIN_SPEC,
            Self::Provider => &PROVIDER_SPEC,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::Provider => "provider",
        }
    }

    /// Landing route after a successful login.
    ///
    /// Providers land on their subtype's dashboard; without a known subtype
    /// they go back to the provider login page.
    #[must_use]
    pub fn home_route(self, provider_type: Option<ProviderType>) -> &'static str {
        match self {
            Self::User => "/bookings",
            Self::Admin => "/admin/dashboard",
            Self::Provider => provider_type.map_or(PROVIDER_SPEC.login_route, ProviderType::dashboard_route),
        }
    }
}

impl fmt::Display for PrincipalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrincipalKind {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            "provider" => Ok(Self::Provider),
            other => Err(format!("unknown principal kind: {other}")),
        }
    }
}

/// Business role of a service provider. One provider token namespace spans
/// all three, so provider routes check the subtype explicitly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderType {
    HotelProvider,
    TourGuide,
    VehicleProvider,
}

impl ProviderType {
    pub const ALL: [Self; 3] = [Self::HotelProvider, Self::TourGuide, Self::VehicleProvider];

    /// Wire name, as the backend spells it in `providerType`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HotelProvider => "HotelProvider",
            Self::TourGuide => "TourGuide",
            Self::VehicleProvider => "VehicleProvider",
        }
    }

    #[must_use]
    pub const fn dashboard_route(self) -> &'static str {
        match self {
            Self::HotelProvider => "/service-provider/hotel",
            Self::TourGuide => "/service-provider/tour-guide",
            Self::VehicleProvider => "/service-provider/vehicle",
        }
    }
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderType {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if let Some(found) = Self::ALL.into_iter().find(|t| t.as_str() == trimmed) {
            return Ok(found);
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "hotel-provider" | "hotel" => Ok(Self::HotelProvider),
            "tour-guide" | "guide" => Ok(Self::TourGuide),
            "vehicle-provider" | "vehicle" => Ok(Self::VehicleProvider),
            _ => Err(format!("unknown provider type: {trimmed}")),
        }
    }
}

/// One row of the guard table.
#[derive(Debug, PartialEq, Eq)]
pub struct GuardSpec {
    pub kind: PrincipalKind,
    /// `GET` endpoint that accepts the bearer token.
    pub verify_endpoint: &'static str,
    /// `POST` endpoint that exchanges credentials for a token.
    pub login_endpoint: &'static str,
    /// Storage key holding the raw token.
    pub token_key: &'static str,
    /// Storage key holding the cached principal as JSON.
    pub principal_key: &'static str,
    /// Field of the login/verify response body carrying the principal.
    pub principal_field: &'static str,
    /// Route an unauthenticated visitor is redirected to.
    pub login_route: &'static str,
}

const USER_SPEC: GuardSpec = GuardSpec {
    kind: PrincipalKind::User,
    verify_endpoint: "/api/bookings/verify-token",
    login_endpoint: "/api/login",
    token_key: "token",
    principal_key: "user",
    principal_field: "user",
    login_route: "/login",
};

const ADMIN_SPEC: GuardSpec = GuardSpec {
    kind: PrincipalKind::Admin,
    verify_endpoint: "/api/verify-admin-token",
    login_endpoint: "/api/admin/login",
    token_key: "adminToken",
    principal_key: "admin",
    principal_field: "admin",
    login_route: "/admin/login",
};

const PROVIDER_SPEC: GuardSpec = GuardSpec {
    kind: PrincipalKind::Provider,
    verify_endpoint: "/api/verify-provider-token",
    login_endpoint: "/api/service-provider/login",
    token_key: "providerToken",
    principal_key: "provider",
    principal_field: "provider",
    login_route: "/service-provider/login",
};

/// What a protected route requires of its visitor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RouteAccess {
    pub kind: PrincipalKind,
    /// Only consulted when `kind` is [`PrincipalKind::Provider`].
    pub subtype: Option<ProviderType>,
}

impl RouteAccess {
    #[must_use]
    pub const fn user() -> Self {
        Self { kind: PrincipalKind::User, subtype: None }
    }

    #[must_use]
    pub const fn admin() -> Self {
        Self { kind: PrincipalKind::Admin, subtype: None }
    }

    /// Any provider, regardless of subtype.
    #[must_use]
    pub const fn provider() -> Self {
        Self { kind: PrincipalKind::Provider, subtype: None }
    }

    #[must_use]
    pub const fn provider_of(subtype: ProviderType) -> Self {
        Self { kind: PrincipalKind::Provider, subtype: Some(subtype) }
    }

    /// Subtype requirement, dropped for non-provider kinds.
    #[must_use]
    pub const fn required_subtype(&self) -> Option<ProviderType> {
        match self.kind {
            PrincipalKind::Provider => self.subtype,
            PrincipalKind::User | PrincipalKind::Admin => None,
        }
    }

    #[must_use]
    pub const fn spec(&self) -> &'static GuardSpec {
        self.kind.spec()
    }
}
