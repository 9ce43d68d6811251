//! Working tree operations for Strata.
//!
//! - [`snapshot`] — walk a live directory into an in-memory [`Tree`],
//!   applying an externally supplied ignore predicate.
//! - [`restore`] — reconstruct a committed tree on disk, deleting divergent
//!   paths first (best effort) and then materializing the target's files.
//! - [`IgnorePredicate`] — the boundary to ignore-rule matching; the core
//!   owns no rule parsing.
//!
//! [`Tree`]: strata_store::Tree

pub mod error;
pub mod ignore;
pub mod restore;
pub mod snapshot;

pub use error::{WorktreeError, WorktreeResult};
pub use ignore::{IgnoreNothing, IgnorePredicate};
pub use restore::restore;
pub use snapshot::snapshot;
