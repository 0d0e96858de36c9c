//! Token verification: the HTTP seam and response classification.
//!
//! DESIGN
//! ======
//! Transports only move bytes (`GET` with a bearer token, return status and
//! body). Deciding what a reply means lives in [`classify`] so the browser
//! and native transports cannot drift apart on edge cases.

#[cfg(test)]
#[path = "verify_test.rs"]
mod verify_test;

use std::time::Duration;

use serde_json::{Map, Value};

use crate::error::GuardError;
use crate::kind::{PrincipalKind, RouteAccess};
use crate::principal::Principal;

/// Verification requests give up after this long unless configured otherwise.
pub const DEFAULT_VERIFY_TIMEOUT: Duration = Duration::from_secs(10);

/// Raw reply from a verification endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("request cancelled")]
    Cancelled,
}

impl From<TransportError> for GuardError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Cancelled => Self::Cancelled,
            other => Self::NetworkFailure(other.to_string()),
        }
    }
}

/// Issues authenticated `GET` requests against the backend.
///
/// `?Send` because browser fetch futures are not `Send`.
#[async_trait::async_trait(?Send)]
pub trait Transport {
    /// `GET path` with `Authorization: Bearer <token>`.
    ///
    /// # Errors
    ///
    /// Returns an error if no HTTP response was received.
    async fn get_with_bearer(&self, path: &str, token: &str) -> Result<HttpReply, TransportError>;
}

#[async_trait::async_trait(?Send)]
impl<T: Transport + ?Sized> Transport for &T {
    async fn get_with_bearer(&self, path: &str, token: &str) -> Result<HttpReply, TransportError> {
        (**self).get_with_bearer(path, token).await
    }
}

#[async_trait::async_trait(?Send)]
impl<T: Transport + ?Sized> Transport for std::rc::Rc<T> {
    async fn get_with_bearer(&self, path: &str, token: &str) -> Result<HttpReply, TransportError> {
        (**self).get_with_bearer(path, token).await
    }
}

/// Turn a verification reply into a principal or a denial.
///
/// `cached` is the principal stored at login; user and admin endpoints do
/// not echo the principal back, so it fills in when the body has none.
///
/// # Errors
///
/// - [`GuardError::VerificationRejected`] for any non-2xx status.
/// - [`GuardError::MalformedResponse`] when the body is not a JSON object, or
///   a provider body lacks a `provider` object with a known `providerType`.
///   Only `providerType` is required; other principal fields are read
///   leniently. A user or admin principal that is not an object is ignored.
/// - [`GuardError::SubtypeMismatch`] when a provider route requires a
///   different subtype than the one returned.
pub fn classify(access: &RouteAccess, reply: &HttpReply, cached: Option<Principal>) -> Result<Principal, GuardError> {
    if !reply.is_success() {
        return Err(GuardError::VerificationRejected { status: reply.status });
    }

    let mut body = parse_body(&reply.body)?;
    let field = access.spec().principal_field;
    let echoed = body.remove(field).filter(|v| !v.is_null());

    match access.kind {
        PrincipalKind::User | PrincipalKind::Admin => {
            let echoed = echoed.and_then(|v| match v {
                Value::Object(map) => Some(Principal::from_map(map)),
                other => {
                    tracing::debug!(field, got = json_kind(&other), "ignoring non-object principal");
                    None
                }
            });
            Ok(echoed.or(cached).unwrap_or_default())
        }
        PrincipalKind::Provider => {
            let principal = match echoed {
                Some(Value::Object(map)) => Principal::from_map(map),
                Some(other) => {
                    return Err(GuardError::MalformedResponse(format!(
                        "`{field}`: expected JSON object, got {}",
                        json_kind(&other)
                    )));
                }
                None => return Err(GuardError::MalformedResponse(format!("missing `{field}`"))),
            };
            let Some(actual) = principal.provider_type else {
                return Err(GuardError::MalformedResponse(match principal.unrecognized_provider_type() {
                    Some(raw) => format!("unknown `providerType`: {raw}"),
                    None => "missing `providerType`".to_owned(),
                }));
            };
            match access.required_subtype() {
                Some(required) if required != actual => Err(GuardError::SubtypeMismatch { required, actual }),
                _ => Ok(principal),
            }
        }
    }
}

fn parse_body(raw: &str) -> Result<Map<String, Value>, GuardError> {
    if raw.trim().is_empty() {
        return Ok(Map::new());
    }
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(GuardError::MalformedResponse(format!("expected JSON object, got {}", json_kind(&other)))),
        Err(e) => Err(GuardError::MalformedResponse(e.to_string())),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
