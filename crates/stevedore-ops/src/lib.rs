//! High-level operations for Stevedore.
//!
//! Each `ops_*` module implements one command end to end, wiring the core
//! types, the Maven protocol crate, and terminal output together.

pub mod ops_publish;
