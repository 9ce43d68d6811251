//! Repository handle for Strata.
//!
//! [`Repository`] is an explicit handle threaded through every operation:
//! it owns the object store and head pointer for one control directory and
//! never reads ambient global state. Operations assume exclusive access to
//! one working tree and one object store for their duration; all I/O is
//! blocking and runs to completion or fails outright.

pub mod error;
pub mod outcome;
pub mod repository;

pub use error::{RepoError, RepoResult};
pub use outcome::{CommitOutcome, Status};
pub use repository::{Repository, CONTROL_DIR};
