//! Core data types for Stevedore.
//!
//! Defines the fundamental types used throughout the publisher: coordinates
//! and snapshot versions, build time, caller options and their validation,
//! the `Stevedore.toml` configuration file, and the descriptor templates.

pub mod config;
pub mod coordinates;
pub mod options;
pub mod template;
