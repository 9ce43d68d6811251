//! Structural diff engine for Strata.
//!
//! Compares two directory trees and produces an ordered list of structural
//! changes: added, removed, modified, or renamed paths. Comparison is
//! whole-object (by digest); content-level diffs are out of scope.
//!
//! # Key Types
//!
//! - [`Change`] — one classified change with its relative path(s)
//! - [`diff_trees`] — the two-pass tree comparison

pub mod change;
pub mod tree_diff;

pub use change::Change;
pub use tree_diff::diff_trees;
