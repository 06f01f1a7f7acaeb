//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, inbound timeout)
//! - Dispatch every GET path to the forwarding gateway
//! - Serve until the shutdown signal fires

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{Request, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::validation::HEALTH_PATH;
use crate::config::{GatewayConfig, TimeoutConfig};
use crate::gateway::{Gateway, GatewayBuildError, HttpTransport, Transport};
use crate::http::request::{propagate_request_id_layer, set_request_id_layer, RequestIdExt};

/// HTTP server for the passthrough gateway.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayBuildError> {
        let gateway = Arc::new(Gateway::<HttpTransport>::from_config(&config)?);

        tracing::info!(
            routes = gateway.routes().len(),
            upstream_timeout_ms = gateway.upstream_timeout().as_millis() as u64,
            "Gateway initialised"
        );

        let router = build_router(gateway, &config.timeouts);
        Ok(Self { router })
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Draining in-flight requests");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Build the Axum router with all middleware layers.
///
/// Generic over the transport so the whole HTTP surface can run against an
/// in-memory upstream.
#[allow(deprecated)]
pub fn build_router<T: Transport>(gateway: Arc<Gateway<T>>, timeouts: &TimeoutConfig) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(set_request_id_layer())
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "request",
                request_id = %request.headers().request_id(),
                method = %request.method(),
                path = %request.uri().path(),
            )
        }))
        .layer(propagate_request_id_layer())
        .layer(TimeoutLayer::new(Duration::from_secs(timeouts.request_secs)));

    Router::new()
        .route(HEALTH_PATH, get(health_handler))
        .route("/", get(forward_handler::<T>))
        .route("/{*path}", get(forward_handler::<T>))
        .with_state(gateway)
        .layer(middleware)
}

/// Relay one request through the gateway.
async fn forward_handler<T: Transport>(State(gateway): State<Arc<Gateway<T>>>, uri: Uri) -> Response {
    match gateway.forward(uri.path()).await {
        Ok(forwarded) => forwarded.into_response(),
        Err(e) => e.into_response(),
    }
}

async fn health_handler() -> &'static str {
    "ok"
}
