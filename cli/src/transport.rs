//! Native HTTP transport backed by `reqwest`.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use std::time::Duration;

use guard::{HttpReply, LoginRequest, Transport, TransportError};

pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Build a transport rooted at `base_url` (trailing `/` ignored).
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()?;
        Ok(Self { client, base_url: base_url.trim_end_matches('/').to_owned(), timeout })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `POST` a login body to `path`, returning the raw reply.
    ///
    /// # Errors
    ///
    /// Returns an error if no HTTP response was received.
    pub async fn post_login(&self, path: &str, request: &LoginRequest<'_>) -> Result<HttpReply, TransportError> {
        let response = self
            .client
            .post(self.url(path))
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_err(&e))?;
        self.into_reply(response).await
    }

    async fn into_reply(&self, response: reqwest::Response) -> Result<HttpReply, TransportError> {
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| self.map_err(&e))?;
        Ok(HttpReply { status, body })
    }

    fn map_err(&self, err: &reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else {
            TransportError::Network(err.to_string())
        }
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for ReqwestTransport {
    async fn get_with_bearer(&self, path: &str, token: &str) -> Result<HttpReply, TransportError> {
        tracing::debug!(%path, "verify request");
        let response = self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| self.map_err(&e))?;
        self.into_reply(response).await
    }
}
