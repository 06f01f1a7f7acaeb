//! The forwarding gateway.

use std::time::{Duration, Instant};

use reqwest::StatusCode;

use crate::config::GatewayConfig;
use crate::gateway::decode::{decode, Payload};
use crate::gateway::error::ForwardError;
use crate::gateway::transport::{HttpTransport, Transport, TransportError};
use crate::observability::metrics;
use crate::resilience::with_deadline;
use crate::routing::{ResponseShape, RouteTable, RouteTableError};
use url::Url;

/// A successful forward: upstream status plus the decoded body.
#[derive(Debug)]
pub struct Forwarded {
    pub status: StatusCode,
    pub payload: Payload,
}

pub type ForwardResult = Result<Forwarded, ForwardError>;

/// Error constructing a gateway from configuration.
#[derive(Debug, thiserror::Error)]
pub enum GatewayBuildError {
    #[error(transparent)]
    Routes(#[from] RouteTableError),

    #[error("failed to build upstream client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Maps logical paths to upstream URLs and relays single GET calls.
///
/// Holds no mutable state; share it behind an `Arc` across requests.
#[derive(Debug)]
pub struct Gateway<T = HttpTransport> {
    routes: RouteTable,
    transport: T,
    upstream_timeout: Duration,
}

impl Gateway<HttpTransport> {
    /// Build the route table and pooled client described by `config`.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, GatewayBuildError> {
        let routes = RouteTable::from_config(&config.upstream.base_url, &config.routes)?;
        let transport = HttpTransport::new(&config.upstream)?;
        Ok(Self::new(
            routes,
            transport,
            Duration::from_millis(config.timeouts.upstream_ms),
        ))
    }
}

impl<T: Transport> Gateway<T> {
    pub fn new(routes: RouteTable, transport: T, upstream_timeout: Duration) -> Self {
        Self {
            routes,
            transport,
            upstream_timeout,
        }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn upstream_timeout(&self) -> Duration {
        self.upstream_timeout
    }

    /// Forward one request for `logical_path`.
    ///
    /// Unknown paths fail without touching the network. Otherwise exactly one
    /// upstream call is made, bounded by the upstream timeout.
    pub async fn forward(&self, logical_path: &str) -> ForwardResult {
        let started = Instant::now();

        let Some(route) = self.routes.get(logical_path) else {
            tracing::debug!(path = %logical_path, "No route matched");
            metrics::record_forward("none", "unknown_route", started);
            return Err(ForwardError::UnknownRoute(logical_path.to_string()));
        };

        let result = self.call(route.upstream_url(), route.response_shape()).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match &result {
            Ok(forwarded) => {
                tracing::info!(
                    route = %logical_path,
                    status = %forwarded.status,
                    elapsed_ms,
                    "Forward completed"
                );
                metrics::record_forward(route.logical_path(), "ok", started);
            }
            Err(e) => {
                tracing::warn!(
                    route = %logical_path,
                    upstream = %route.upstream_url(),
                    kind = e.kind(),
                    error = %e,
                    elapsed_ms,
                    "Forward failed"
                );
                metrics::record_forward(route.logical_path(), e.kind(), started);
            }
        }

        result
    }

    async fn call(&self, url: &Url, shape: ResponseShape) -> ForwardResult {
        let response = match with_deadline(self.upstream_timeout, self.transport.fetch(url)).await {
            Ok(Ok(response)) => response,
            Ok(Err(TransportError::Timeout)) | Err(_) => {
                return Err(ForwardError::UpstreamTimeout(self.upstream_timeout));
            }
            Ok(Err(e)) => return Err(ForwardError::UpstreamUnreachable(e.to_string())),
        };

        if !response.status.is_success() {
            return Err(ForwardError::upstream_error(response.status, &response.body));
        }

        let payload = decode(shape, &response.body)?;
        Ok(Forwarded {
            status: response.status,
            payload,
        })
    }
}
