//! # spawncap-process
//!
//! Synchronous process launch with stdout/stderr capture (Unix only).
//!
//! This crate provides the low-level launch-and-capture primitive:
//! - Pipe creation for the two captured streams
//! - A child-side file-descriptor redirection plan
//! - The spawn call with an owned argument/environment vector
//! - A readiness-driven drain loop that empties both streams without
//!   deadlocking
//! - Process existence checking and reaping
//!
//! The entry point is [`runner::ProcessRunner::run`].

pub mod check;
pub mod drain;
pub mod pipe;
pub mod plan;
pub mod runner;
pub mod validation;

mod spawn;

// Re-export main types
pub use check::process_exists;
pub use drain::StreamBuffers;
pub use pipe::CapturePipe;
pub use plan::RedirectionPlan;
pub use runner::ProcessRunner;
pub use spawncap_common::{LaunchOutcome, LaunchRequest, ProcessError, ProcessResult};
