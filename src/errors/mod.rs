//! Centralized error handling for the media-thumbs crate.
//!
//! Failure modes fall into two buckets, and the types here keep them apart:
//!
//! - **Expected absence** (a descriptor or cover that was never stored, a
//!   store read that failed to decode) is *not* an error. It is logged and
//!   reported as a miss, and callers fall back to full re-analysis.
//! - **Real failures** (a store write that was lost, a present-but-corrupt
//!   cover, a resource no loader can thumbnail) surface as typed errors.

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;
