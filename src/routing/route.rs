//! Route definitions.

use serde::{Deserialize, Serialize};
use url::Url;

/// Expected structural category of an upstream body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseShape {
    /// One JSON value, relayed verbatim.
    SingleValue,
    /// A JSON array of opaque records.
    #[default]
    Collection,
    /// UTF-8 text, never parsed.
    RawText,
}

impl ResponseShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseShape::SingleValue => "single_value",
            ResponseShape::Collection => "collection",
            ResponseShape::RawText => "raw_text",
        }
    }
}

impl std::fmt::Display for ResponseShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A compiled route. Immutable once the table is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDefinition {
    logical_path: String,
    upstream_url: Url,
    response_shape: ResponseShape,
}

impl RouteDefinition {
    pub fn new(logical_path: impl Into<String>, upstream_url: Url, response_shape: ResponseShape) -> Self {
        Self {
            logical_path: logical_path.into(),
            upstream_url,
            response_shape,
        }
    }

    pub fn logical_path(&self) -> &str {
        &self.logical_path
    }

    pub fn upstream_url(&self) -> &Url {
        &self.upstream_url
    }

    pub fn response_shape(&self) -> ResponseShape {
        self.response_shape
    }
}

/// Resolve a configured upstream against the base URL.
///
/// Absolute URLs are used as-is. Anything else is appended to the base,
/// keeping any path prefix the base carries (`https://host/v1` + `/posts`
/// gives `https://host/v1/posts`).
pub fn resolve_upstream(base_url: &str, upstream: &str) -> Result<Url, url::ParseError> {
    match Url::parse(upstream) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = base_url.trim_end_matches('/');
            let rel = upstream.trim_start_matches('/');
            Url::parse(&format!("{}/{}", base, rel))
        }
        Err(e) => Err(e),
    }
}
