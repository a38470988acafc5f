//! Shared utilities for Stevedore.
//!
//! This crate provides cross-cutting concerns used by all other Stevedore
//! crates: the error type, filesystem helpers, content digests, process
//! spawning, and terminal status output.

pub mod errors;
pub mod fs;
pub mod hash;
pub mod process;
pub mod progress;
