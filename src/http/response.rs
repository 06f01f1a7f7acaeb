//! Response mapping.
//!
//! # Responsibilities
//! - Relay a forwarded payload with the upstream status
//! - Map forwarding errors to HTTP status codes
//!
//! # Design Decisions
//! - Bodies are buffered and decoded in full before relaying
//! - Upstream timeouts result in 504 Gateway Timeout
//! - Every other upstream failure is 502; the gateway never answers 500

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::gateway::{ForwardError, Forwarded};

/// Status returned to the caller for a forwarding error.
pub fn status_for(err: &ForwardError) -> StatusCode {
    match err {
        ForwardError::UnknownRoute(_) => StatusCode::NOT_FOUND,
        ForwardError::UpstreamTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
        ForwardError::UpstreamUnreachable(_)
        | ForwardError::UpstreamError { .. }
        | ForwardError::MalformedBody(_) => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for ForwardError {
    fn into_response(self) -> Response {
        (status_for(&self), self.to_string()).into_response()
    }
}

impl IntoResponse for Forwarded {
    fn into_response(self) -> Response {
        let content_type = self.payload.content_type();
        (
            self.status,
            [(header::CONTENT_TYPE, content_type)],
            self.payload.into_bytes(),
        )
            .into_response()
    }
}
