//! # spawncap-common
//!
//! Common types shared across the spawncap workspace.
//!
//! This crate provides the foundational pieces the other crates build
//! upon: the error taxonomy for process launch and capture, and the
//! request/outcome domain types.

pub mod errors;
pub mod types;

// Re-export commonly used items
pub use errors::{ProcessError, ProcessResult};
pub use types::{LaunchOutcome, LaunchRequest};
