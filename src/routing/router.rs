//! Route lookup.
//!
//! # Responsibilities
//! - Store compiled routes
//! - Look up the route for an inbound path
//! - Return the matched route or an explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Exact path match via HashMap, O(1)
//! - Duplicate paths are a construction error, never last-one-wins

use std::collections::HashMap;

use crate::config::RouteConfig;
use crate::routing::route::{resolve_upstream, RouteDefinition};

/// Error building a route table.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RouteTableError {
    #[error("duplicate route path '{0}'")]
    DuplicatePath(String),

    #[error("route '{path}' has invalid upstream: {source}")]
    InvalidUpstream {
        path: String,
        #[source]
        source: url::ParseError,
    },
}

/// Immutable mapping from logical path to route.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: HashMap<String, RouteDefinition>,
}

impl RouteTable {
    /// Build a table from already-resolved definitions.
    pub fn new(definitions: impl IntoIterator<Item = RouteDefinition>) -> Result<Self, RouteTableError> {
        let mut routes = HashMap::new();
        for def in definitions {
            let path = def.logical_path().to_string();
            if routes.contains_key(&path) {
                return Err(RouteTableError::DuplicatePath(path));
            }
            routes.insert(path, def);
        }
        Ok(Self { routes })
    }

    /// Compile route configs, resolving relative upstreams against `base_url`.
    pub fn from_config(base_url: &str, configs: &[RouteConfig]) -> Result<Self, RouteTableError> {
        let definitions = configs
            .iter()
            .map(|c| {
                let url = resolve_upstream(base_url, &c.upstream).map_err(|source| {
                    RouteTableError::InvalidUpstream {
                        path: c.path.clone(),
                        source,
                    }
                })?;
                Ok(RouteDefinition::new(c.path.clone(), url, c.shape))
            })
            .collect::<Result<Vec<_>, RouteTableError>>()?;

        let table = Self::new(definitions)?;
        for route in table.routes.values() {
            tracing::debug!(
                path = %route.logical_path(),
                upstream = %route.upstream_url(),
                shape = %route.response_shape(),
                "Route compiled"
            );
        }
        Ok(table)
    }

    pub fn get(&self, logical_path: &str) -> Option<&RouteDefinition> {
        self.routes.get(logical_path)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// All routes, sorted by path.
    pub fn routes(&self) -> Vec<&RouteDefinition> {
        let mut routes: Vec<_> = self.routes.values().collect();
        routes.sort_by(|a, b| a.logical_path().cmp(b.logical_path()));
        routes
    }
}
