//! Login exchange shared by the browser and the CLI.
//!
//! Both front ends `POST` the same body to the kind's login endpoint and must
//! agree on how a reply becomes a stored credential.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use serde::Serialize;
use serde_json::Value;

use crate::kind::PrincipalKind;
use crate::principal::{Credential, Principal};
use crate::store::{CredentialStore, StoreError};
use crate::verify::HttpReply;

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("{0}")]
    Rejected(String),

    #[error("unexpected login response: {0}")]
    Malformed(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Validate a login form, returning trimmed values.
///
/// # Errors
///
/// Returns a user-facing message when either field is empty or the email
/// has no `@`.
pub fn validate_login_input(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Enter both email and password.");
    }
    if !email.contains('@') {
        return Err("Enter a valid email address.");
    }
    Ok((email.to_owned(), password.to_owned()))
}

/// Turn a login reply into a credential and the principal it names.
///
/// # Errors
///
/// - [`LoginError::Rejected`] for non-2xx replies, carrying the backend's
///   `message` when it sent one.
/// - [`LoginError::Malformed`] when the body has no usable `token`.
pub fn parse_login_reply(kind: PrincipalKind, reply: &HttpReply) -> Result<(Credential, Option<Principal>), LoginError> {
    let body = serde_json::from_str::<Value>(&reply.body).ok();
    if !reply.is_success() {
        return Err(LoginError::Rejected(rejection_message(reply.status, body.as_ref())));
    }

    let mut body = match body {
        Some(Value::Object(map)) => map,
        _ => return Err(LoginError::Malformed("expected JSON object".to_owned())),
    };
    let credential = body
        .get("token")
        .and_then(Value::as_str)
        .and_then(|token| Credential::new(kind, token))
        .ok_or_else(|| LoginError::Malformed("missing `token`".to_owned()))?;
    let principal = body
        .remove(kind.spec().principal_field)
        .and_then(|v| serde_json::from_value::<Principal>(v).ok());
    Ok((credential, principal))
}

/// Parse a login reply and persist it, returning the principal.
///
/// # Errors
///
/// Propagates [`parse_login_reply`] errors and store write failures.
pub fn complete_login<S: CredentialStore>(
    store: &S,
    kind: PrincipalKind,
    reply: &HttpReply,
) -> Result<Principal, LoginError> {
    let (credential, principal) = parse_login_reply(kind, reply)?;
    store.set(&credential, principal.as_ref())?;
    tracing::info!(%kind, "login stored");
    Ok(principal.unwrap_or_default())
}

fn rejection_message(status: u16, body: Option<&Value>) -> String {
    body.and_then(|b| b.get("message"))
        .and_then(Value::as_str)
        .filter(|m| !m.trim().is_empty())
        .map_or_else(|| format!("login failed: {status}"), ToOwned::to_owned)
}
