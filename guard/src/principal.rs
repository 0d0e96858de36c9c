//! Credentials, verified principals, and the per-render auth state.

#[cfg(test)]
#[path = "principal_test.rs"]
mod principal_test;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::kind::{PrincipalKind, ProviderType};

/// A locally stored bearer token for one principal kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credential {
    pub token: String,
    pub kind: PrincipalKind,
}

impl Credential {
    /// Build a credential, treating blank tokens as absent.
    #[must_use]
    pub fn new(kind: PrincipalKind, token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return None;
        }
        Some(Self { token, kind })
    }
}

/// Identity returned by the backend for a verified token.
///
/// Backends are inconsistent about field names (`_id` vs `id`, `name` vs
/// `username`) and id types, so decoding never fails on an object: the first
/// usable alias wins and everything else is kept verbatim in `extra`. An
/// unrecognized `providerType` also stays in `extra`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Principal {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "displayName", skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(rename = "providerType", skip_serializing_if = "Option::is_none")]
    pub provider_type: Option<ProviderType>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

const ID_KEYS: [&str; 2] = ["id", "_id"];
const NAME_KEYS: [&str; 4] = ["displayName", "name", "username", "fullName"];
const PROVIDER_TYPE_KEY: &str = "providerType";

impl<'de> Deserialize<'de> for Principal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::<String, Value>::deserialize(deserializer).map(Self::from_map)
    }
}

impl Principal {
    /// Decode a backend principal object, taking the first usable alias for
    /// each known field.
    #[must_use]
    pub fn from_map(mut extra: Map<String, Value>) -> Self {
        let id = take_first(&mut extra, &ID_KEYS, |v| match v {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        });
        let display_name = take_first(&mut extra, &NAME_KEYS, |v| match v {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            _ => None,
        });
        let provider_type = take_first(&mut extra, &[PROVIDER_TYPE_KEY], |v| {
            serde_json::from_value::<ProviderType>(v.clone()).ok()
        });
        // Leftover aliases must not shadow the canonical names on serialize.
        if id.is_some() {
            extra.remove("id");
        }
        if display_name.is_some() {
            extra.remove("displayName");
        }
        Self { id, display_name, provider_type, extra }
    }

    /// Raw `providerType` that did not name a known subtype, if any.
    #[must_use]
    pub fn unrecognized_provider_type(&self) -> Option<&Value> {
        self.extra.get(PROVIDER_TYPE_KEY).filter(|v| !v.is_null())
    }

    /// Name to show in the UI, falling back to the id, then a generic label.
    #[must_use]
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or("signed in")
    }
}

/// Remove and convert the first key in `keys` whose value `convert` accepts.
/// Keys that were present but unusable stay in `map`.
fn take_first<T>(map: &mut Map<String, Value>, keys: &[&str], convert: impl Fn(&Value) -> Option<T>) -> Option<T> {
    let (key, value) = keys
        .iter()
        .find_map(|key| map.get(*key).and_then(&convert).map(|value| (*key, value)))?;
    map.remove(key);
    Some(value)
}

/// Auth state of one protected-route render.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum AuthState {
    #[default]
    Pending,
    Authenticated(Principal),
    Unauthenticated,
}

impl AuthState {
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Move out of `Pending`. Terminal states never change within a render,
    /// so any later call is ignored and returns `false`.
    pub fn settle(&mut self, next: Self) -> bool {
        if !self.is_pending() || next.is_pending() {
            return false;
        }
        *self = next;
        true
    }

    /// What the guard should display for this state.
    #[must_use]
    pub fn view(&self, kind: PrincipalKind) -> GuardView<'_> {
        match self {
            Self::Pending => GuardView::Loading,
            Self::Authenticated(principal) => GuardView::Content(principal),
            Self::Unauthenticated => GuardView::Redirect { to: kind.spec().login_route, replace: true },
        }
    }
}

/// Observable output of the guard for a given state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GuardView<'a> {
    /// Placeholder only: no protected content and no navigation.
    Loading,
    Content(&'a Principal),
    /// Navigate away; `replace` means the history entry is replaced, not pushed.
    Redirect { to: &'static str, replace: bool },
}
