//! Outbound transport.
//!
//! The first half of a forward: perform one GET and hand back the raw status
//! and fully buffered body. Decoding happens separately in `decode.rs`.

use std::future::Future;

use bytes::Bytes;
use reqwest::StatusCode;
use url::Url;

use crate::config::UpstreamConfig;

/// Raw upstream reply, body fully read.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

/// Transport-level failure. Non-2xx statuses are not errors here.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// TCP/TLS connection could not be established.
    #[error("connection failed: {0}")]
    Connect(String),

    /// The client's own timeout fired.
    #[error("request timed out")]
    Timeout,

    /// Anything else after connecting (reset mid-body, protocol error).
    #[error("request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout
        } else if e.is_connect() {
            TransportError::Connect(e.to_string())
        } else {
            TransportError::Request(e.to_string())
        }
    }
}

/// Performs a single outbound GET.
///
/// Implementations must not retry. Dropping the returned future must cancel
/// the request.
pub trait Transport: Send + Sync + 'static {
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<UpstreamResponse, TransportError>> + Send;
}

/// Pooled reqwest client shared by every request.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .pool_max_idle_per_host(config.pool_max_idle_per_host);
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        Ok(Self { client: builder.build()? })
    }
}

impl Transport for HttpTransport {
    async fn fetch(&self, url: &Url) -> Result<UpstreamResponse, TransportError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        tracing::trace!(url = %url, status = %status, bytes = body.len(), "Upstream replied");
        Ok(UpstreamResponse { status, body })
    }
}
