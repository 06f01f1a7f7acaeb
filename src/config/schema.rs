//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::routing::ResponseShape;

/// Upstream the original service talked to.
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Root configuration for the passthrough gateway.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream API settings shared by all routes.
    pub upstream: UpstreamConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Route definitions mapping inbound paths to upstream URLs.
    pub routes: Vec<RouteConfig>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            upstream: UpstreamConfig::default(),
            timeouts: TimeoutConfig::default(),
            observability: ObservabilityConfig::default(),
            routes: default_routes(),
        }
    }
}

/// The three endpoints the gateway has always exposed.
pub fn default_routes() -> Vec<RouteConfig> {
    vec![
        RouteConfig::new("/api/posts", "/posts", ResponseShape::Collection),
        RouteConfig::new("/api/todo", "/todos/1", ResponseShape::SingleValue),
        RouteConfig::new("/api/photos", "/photos", ResponseShape::Collection),
    ]
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL that relative route upstreams are joined onto.
    pub base_url: String,

    /// User-Agent sent on every outbound request.
    pub user_agent: String,

    /// Idle pooled connections kept per upstream host.
    pub pool_max_idle_per_host: usize,

    /// Honour HTTP_PROXY / HTTPS_PROXY from the environment.
    pub system_proxy: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
            user_agent: concat!("passthrough-gateway/", env!("CARGO_PKG_VERSION")).to_string(),
            pool_max_idle_per_host: 32,
            system_proxy: true,
        }
    }
}

/// Route configuration mapping one inbound path to one upstream.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RouteConfig {
    /// Inbound logical path (e.g., "/api/posts").
    pub path: String,

    /// Absolute upstream URL, or a path joined onto `upstream.base_url`.
    pub upstream: String,

    /// Expected shape of the upstream body.
    #[serde(default)]
    pub shape: ResponseShape,
}

impl RouteConfig {
    pub fn new(path: impl Into<String>, upstream: impl Into<String>, shape: ResponseShape) -> Self {
        Self {
            path: path.into(),
            upstream: upstream.into(),
            shape,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Bound on a single outbound call (connect, send, full body read) in milliseconds.
    pub upstream_ms: u64,

    /// Inbound request timeout in seconds. Must exceed `upstream_ms`.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            upstream_ms: 5_000,
            request_secs: 30,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    pub log_level: String,

    /// Pretty output for development, JSON for log aggregation.
    pub log_format: LogFormat,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_mirror_original_endpoints() {
        let config = GatewayConfig::default();
        assert_eq!(config.upstream.base_url, DEFAULT_UPSTREAM_BASE_URL);
        assert_eq!(config.timeouts.upstream_ms, 5_000);

        let paths: Vec<&str> = config.routes.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, ["/api/posts", "/api/todo", "/api/photos"]);
        assert_eq!(config.routes[1].shape, ResponseShape::SingleValue);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: GatewayConfig = toml::from_str(
            r#"
            [timeouts]
            upstream_ms = 250

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.timeouts.upstream_ms, 250);
        assert_eq!(config.timeouts.request_secs, 30);
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.routes.len(), 3);
    }

    #[test]
    fn test_routes_table_replaces_defaults() {
        let config: GatewayConfig = toml::from_str(
            r#"
            [[routes]]
            path = "/api/readme"
            upstream = "https://example.com/README"
            shape = "raw_text"

            [[routes]]
            path = "/api/users"
            upstream = "/users"
            "#,
        )
        .unwrap();

        assert_eq!(config.routes.len(), 2);
        assert_eq!(config.routes[0].shape, ResponseShape::RawText);
        assert_eq!(config.routes[1].shape, ResponseShape::Collection);
    }
}
