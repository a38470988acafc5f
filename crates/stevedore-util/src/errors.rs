use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all Stevedore operations.
#[derive(Debug, Error, Diagnostic)]
pub enum StevedoreError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Publish options are missing a required field or are malformed.
    #[error("Invalid options: {message}")]
    #[diagnostic(help("Pass the missing value on the command line or in Stevedore.toml"))]
    InvalidOptions { message: String },

    /// Configuration file could not be read or parsed.
    #[error("Configuration error: {message}")]
    #[diagnostic(help("Check your Stevedore.toml for syntax errors"))]
    Config { message: String },

    /// A descriptor template could not be rendered into valid XML.
    #[error("Template error: {message}")]
    Template { message: String },

    /// Writing descriptors or digests to the staging directory failed.
    #[error("Staging failed: {message}")]
    Staging { message: String },

    /// The upload transport could not be constructed or invoked.
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// One or more uploads failed.
    #[error("Publish failed: {message}")]
    Publish { message: String },
}
