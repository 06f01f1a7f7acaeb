//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to upstream:
//!     → timeouts.rs (enforce the per-call deadline)
//!     → On expiry: UpstreamTimeout, mapped to 504
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every upstream call has a deadline
//! - Single attempt per call; retrying is the caller's decision

pub mod timeouts;

pub use timeouts::{with_deadline, DeadlineExceeded};
