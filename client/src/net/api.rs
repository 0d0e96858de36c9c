//! REST API helpers for communicating with the backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning an error since these endpoints
//! are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result<_, String>` with a user-facing message instead of
//! panics, so a failed login degrades to an inline notice.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use guard::{Principal, PrincipalKind};

/// Pair a login status with its body, surfacing a failed body read as the
/// error instead of an empty body.
#[cfg(any(test, feature = "hydrate"))]
fn login_reply<E: std::fmt::Display>(status: u16, body: Result<String, E>) -> Result<guard::HttpReply, String> {
    let body = body.map_err(|e| e.to_string())?;
    Ok(guard::HttpReply { status, body })
}

/// Log in as `kind` via the kind's login endpoint and store the credential.
///
/// # Errors
///
/// Returns a user-facing message if the request fails, the backend rejects
/// the credentials, or the credential cannot be stored.
pub async fn login(kind: PrincipalKind, email: &str, password: &str) -> Result<Principal, String> {
    #[cfg(feature = "hydrate")]
    {
        let payload = guard::LoginRequest { email, password };
        let resp = gloo_net::http::Request::post(kind.spec().login_endpoint)
            .json(&payload)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        let reply = login_reply(resp.status(), resp.text().await)?;
        guard::complete_login(&crate::util::storage::browser_store(), kind, &reply).map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (kind, email, password);
        Err("not available on server".to_owned())
    }
}
