//! Passthrough gateway library.
//!
//! Forwards a fixed set of inbound GET paths to upstream REST endpoints and
//! relays their bodies unmodified.

pub mod config;
pub mod gateway;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod routing;

pub use config::GatewayConfig;
pub use gateway::{ForwardError, Gateway};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
