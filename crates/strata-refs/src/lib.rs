//! Head pointer management for Strata.
//!
//! The head is a single digest naming the most recent commit in the active
//! line of history. An absent head means a fresh repository with no commits
//! yet — a normal state, not an error.
//!
//! - [`HeadStore`] — the storage interface
//! - [`FsHeadStore`] — plain-text hex digest in a `HEAD` file
//! - [`InMemoryHeadStore`] — for tests

pub mod error;
pub mod fs;
pub mod memory;
pub mod traits;

pub use error::{RefError, RefResult};
pub use fs::FsHeadStore;
pub use memory::InMemoryHeadStore;
pub use traits::HeadStore;
