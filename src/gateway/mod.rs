//! Forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! logical path
//!     → forward.rs (RouteTable lookup; unknown → UnknownRoute, no I/O)
//!     → transport.rs (one GET under the upstream deadline → status + bytes)
//!     → non-2xx → UpstreamError(status, snippet)
//!     → decode.rs (SingleValue | Collection | RawText)
//!     → Forwarded { status, payload }
//! ```
//!
//! # Design Decisions
//! - Transport and decoding are separate so each can be tested alone
//! - One attempt per call, no retries
//! - Payloads are never transformed, only validated against their shape

pub mod decode;
pub mod error;
pub mod forward;
pub mod transport;

pub use decode::{decode, DecodeError, Payload};
pub use error::ForwardError;
pub use forward::{ForwardResult, Forwarded, Gateway, GatewayBuildError};
pub use transport::{HttpTransport, Transport, TransportError, UpstreamResponse};
