use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

/// A raw carrier HTTP response, prior to any interpretation.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Connection-level failure from the HTTP client, before any response
/// arrived. Non-success responses are not failures at this layer.
#[derive(Debug, Error)]
pub enum TransportFailure {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    /// For transports that are not backed by reqwest (tests, fakes).
    #[error("{0}")]
    Other(String),
}

/// The HTTP collaborator a driver issues requests through.
///
/// Implementations return every received response as a [`RawResponse`],
/// whatever its status code; classifying 4xx/5xx into faults is the
/// driver's job. Retries, timeouts, and cancellation belong to the
/// implementation, not to the drivers.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(
        &self,
        path: &str,
        query: &[(String, String)],
        headers: &[(String, String)],
    ) -> Result<RawResponse, TransportFailure>;
}

/// Default transport backed by a shared [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    base_url: String,
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Use a caller-configured client (pools, proxies, timeouts).
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(
        &self,
        path: &str,
        query: &[(String, String)],
        headers: &[(String, String)],
    ) -> Result<RawResponse, TransportFailure> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.get(&url).query(query);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        debug!(%url, status, body_bytes = body.len(), "carrier API response");

        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_stripped_of_trailing_slashes() {
        let transport = ReqwestTransport::new("https://example.test///");
        assert_eq!(transport.base_url(), "https://example.test");
    }
}
