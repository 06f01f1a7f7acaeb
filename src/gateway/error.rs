//! Forwarding error taxonomy.

use std::time::Duration;

use reqwest::StatusCode;

use crate::gateway::decode::DecodeError;

/// Longest upstream body excerpt carried in an `UpstreamError`, in bytes.
pub const SNIPPET_LIMIT: usize = 256;

/// Why a forward failed. Every variant is terminal for the request; none
/// are retried.
#[derive(Debug, thiserror::Error)]
pub enum ForwardError {
    #[error("no route for '{0}'")]
    UnknownRoute(String),

    #[error("upstream did not respond within {}ms", .0.as_millis())]
    UpstreamTimeout(Duration),

    #[error("upstream unreachable: {0}")]
    UpstreamUnreachable(String),

    #[error("upstream returned {status}: {snippet}")]
    UpstreamError { status: StatusCode, snippet: String },

    #[error(transparent)]
    MalformedBody(#[from] DecodeError),
}

impl ForwardError {
    /// Stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ForwardError::UnknownRoute(_) => "unknown_route",
            ForwardError::UpstreamTimeout(_) => "upstream_timeout",
            ForwardError::UpstreamUnreachable(_) => "upstream_unreachable",
            ForwardError::UpstreamError { .. } => "upstream_error",
            ForwardError::MalformedBody(_) => "malformed_body",
        }
    }

    pub(crate) fn upstream_error(status: StatusCode, body: &[u8]) -> Self {
        ForwardError::UpstreamError {
            status,
            snippet: snippet(body, SNIPPET_LIMIT),
        }
    }
}

/// Lossy, trimmed excerpt of `body`, at most `limit` bytes plus an ellipsis
/// when anything was cut.
pub fn snippet(body: &[u8], limit: usize) -> String {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();

    if text.len() <= limit {
        return text.to_string();
    }

    let mut end = limit;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", text[..end].trim_end())
}
