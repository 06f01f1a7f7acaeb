//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup):
//!     RouteConfig[] + upstream base URL
//!     → route.rs (resolve upstream to an absolute URL)
//!     → router.rs (reject duplicates, freeze as immutable RouteTable)
//!
//! Incoming Request (path)
//!     → RouteTable::get
//!     → Return: RouteDefinition or None
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Exact path matching only, no prefixes or patterns
//! - Deterministic: same path always yields the same route

pub mod route;
pub mod router;

pub use route::{resolve_upstream, ResponseShape, RouteDefinition};
pub use router::{RouteTable, RouteTableError};
