//! Foundation types for Strata.
//!
//! This crate provides the content-addressing primitive every other Strata
//! crate depends on:
//!
//! - [`Digest`] — 160-bit content digest used as object identity and
//!   storage key throughout the system.

pub mod digest;
pub mod error;

pub use digest::Digest;
pub use error::TypeError;
