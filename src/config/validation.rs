//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, inbound deadline above upstream deadline)
//! - Check that URLs and addresses parse
//! - Detect duplicate or reserved route paths
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use url::Url;

use crate::config::schema::GatewayConfig;
use crate::routing::resolve_upstream;

/// Path served by the gateway itself; routes may not claim it.
pub const HEALTH_PATH: &str = "/healthz";

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    InvalidBindAddress(String),
    InvalidBaseUrl(String),
    ZeroUpstreamTimeout,
    RequestTimeoutTooShort { request_secs: u64, upstream_ms: u64 },
    NoRoutes,
    RelativePath(String),
    DuplicatePath(String),
    ReservedPath(String),
    InvalidUpstream { path: String, upstream: String },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidBindAddress(a) => write!(f, "invalid bind address '{}'", a),
            ValidationError::InvalidBaseUrl(u) => {
                write!(f, "upstream base URL '{}' is not an absolute http(s) URL", u)
            }
            ValidationError::ZeroUpstreamTimeout => write!(f, "upstream timeout must be greater than zero"),
            ValidationError::RequestTimeoutTooShort { request_secs, upstream_ms } => write!(
                f,
                "request timeout ({}s) must exceed upstream timeout ({}ms)",
                request_secs, upstream_ms
            ),
            ValidationError::NoRoutes => write!(f, "no routes configured"),
            ValidationError::RelativePath(p) => write!(f, "route path '{}' must start with '/'", p),
            ValidationError::DuplicatePath(p) => write!(f, "route path '{}' is configured more than once", p),
            ValidationError::ReservedPath(p) => write!(f, "route path '{}' is reserved", p),
            ValidationError::InvalidUpstream { path, upstream } => {
                write!(f, "route '{}' has invalid upstream '{}'", path, upstream)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(config.listener.bind_address.clone()));
    }

    let base = Url::parse(&config.upstream.base_url)
        .ok()
        .filter(|u| matches!(u.scheme(), "http" | "https"));
    if base.is_none() {
        errors.push(ValidationError::InvalidBaseUrl(config.upstream.base_url.clone()));
    }

    let timeouts = &config.timeouts;
    if timeouts.upstream_ms == 0 {
        errors.push(ValidationError::ZeroUpstreamTimeout);
    }
    if timeouts.request_secs.saturating_mul(1000) <= timeouts.upstream_ms {
        errors.push(ValidationError::RequestTimeoutTooShort {
            request_secs: timeouts.request_secs,
            upstream_ms: timeouts.upstream_ms,
        });
    }

    if config.routes.is_empty() {
        errors.push(ValidationError::NoRoutes);
    }

    let mut seen = HashSet::new();
    for route in &config.routes {
        if !route.path.starts_with('/') {
            errors.push(ValidationError::RelativePath(route.path.clone()));
        }
        if route.path == HEALTH_PATH {
            errors.push(ValidationError::ReservedPath(route.path.clone()));
        }
        if !seen.insert(route.path.as_str()) {
            errors.push(ValidationError::DuplicatePath(route.path.clone()));
        }

        // Relative upstreams can only be checked once the base URL is known good.
        let resolves = if base.is_some() {
            resolve_upstream(&config.upstream.base_url, &route.upstream).is_ok()
        } else {
            !matches!(Url::parse(&route.upstream), Err(e) if e != url::ParseError::RelativeUrlWithoutBase)
        };
        if !resolves {
            errors.push(ValidationError::InvalidUpstream {
                path: route.path.clone(),
                upstream: route.upstream.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
