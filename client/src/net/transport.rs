//! Browser verification transport over `fetch`.
//!
//! Client-side (hydrate): `gloo-net` requests carrying an `AbortController`
//! signal. The request is aborted when it outlives its timeout or when the
//! owning future is dropped (route guard disposed).
//! Server-side (SSR): no requests are made; guards never verify on the server.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use std::time::Duration;

use guard::{DEFAULT_VERIFY_TIMEOUT, HttpReply, Transport, TransportError};

#[derive(Clone, Copy, Debug)]
pub struct BrowserTransport {
    timeout: Duration,
}

impl BrowserTransport {
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for BrowserTransport {
    fn default() -> Self {
        Self::with_timeout(DEFAULT_VERIFY_TIMEOUT)
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn bearer_header(token: &str) -> String {
    format!("Bearer {token}")
}

/// `fetch` rejects with a `DOMException` named `AbortError` once aborted.
#[cfg(any(test, feature = "hydrate"))]
fn is_abort_error(message: &str) -> bool {
    message.contains("AbortError")
}

/// Aborts the wrapped fetch when dropped.
#[cfg(feature = "hydrate")]
struct AbortOnDrop(web_sys::AbortController);

#[cfg(feature = "hydrate")]
impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for BrowserTransport {
    async fn get_with_bearer(&self, path: &str, token: &str) -> Result<HttpReply, TransportError> {
        #[cfg(feature = "hydrate")]
        {
            use futures::future::{Either, select};

            let controller = web_sys::AbortController::new()
                .map(AbortOnDrop)
                .map_err(|e| TransportError::Network(format!("{e:?}")))?;
            let signal = controller.0.signal();
            let fetch = async {
                let resp = gloo_net::http::Request::get(path)
                    .header("Authorization", &bearer_header(token))
                    .abort_signal(Some(&signal))
                    .send()
                    .await?;
                let status = resp.status();
                let body = resp.text().await?;
                Ok::<_, gloo_net::Error>(HttpReply { status, body })
            };
            let timer = gloo_timers::future::sleep(self.timeout);
            futures::pin_mut!(fetch, timer);

            match select(fetch, timer).await {
                Either::Left((Ok(reply), _)) => Ok(reply),
                Either::Left((Err(e), _)) => {
                    let message = e.to_string();
                    if is_abort_error(&message) {
                        Err(TransportError::Cancelled)
                    } else {
                        Err(TransportError::Network(message))
                    }
                }
                Either::Right(((), _)) => Err(TransportError::Timeout(self.timeout)),
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (path, token, self.timeout);
            Err(TransportError::Network("not available on server".to_owned()))
        }
    }
}
