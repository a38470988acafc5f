//! Maven repository protocol: remote layout resolution, metadata and POM
//! descriptors, checksum staging, upload transports, and the upload
//! orchestrator.

pub mod auth;
pub mod descriptor;
pub mod layout;
pub mod metadata;
pub mod repository;
pub mod staging;
pub mod transport;
pub mod upload;
