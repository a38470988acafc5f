//! CLI argument definitions for Stevedore.
//!
//! Uses `clap` derive macros to define the command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use stevedore_core::options::TransportKind;

#[derive(Parser, Debug)]
#[command(
    name = "stevedore",
    version,
    about = "Publish a built artifact to a Maven repository",
    long_about = "Stevedore renders maven-metadata.xml and POM descriptors, stages MD5 and \
                  SHA-1 checksums, and uploads one artifact with its descriptors to a \
                  Maven-layout repository."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Publish an artifact and its descriptors
    Publish(PublishArgs),
}

#[derive(Args, Debug, Default)]
pub struct PublishArgs {
    /// Configuration file (defaults to ./Stevedore.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Group id, e.g. com.example
    #[arg(long)]
    pub group_id: Option<String>,

    /// Artifact id
    #[arg(long)]
    pub artifact_id: Option<String>,

    /// Version; versions ending in SNAPSHOT are published timestamped
    #[arg(long = "version")]
    pub version: Option<String>,

    /// Path of the built artifact to upload
    #[arg(long)]
    pub artifact: Option<PathBuf>,

    /// Packaging / file extension, e.g. jar
    #[arg(long)]
    pub packaging: Option<String>,

    /// Classifier appended to the artifact file name
    #[arg(long)]
    pub classifier: Option<String>,

    /// Build time (RFC 3339 or YYYY-MM-DD HH:MM:SS, UTC); defaults to now
    #[arg(long)]
    pub build_time: Option<String>,

    /// Build number for snapshot file names
    #[arg(long)]
    pub build_number: Option<String>,

    /// Repository base URL
    #[arg(long)]
    pub url: Option<String>,

    /// Repository username
    #[arg(long, env = "STEVEDORE_USERNAME")]
    pub username: Option<String>,

    /// Repository password
    #[arg(long, env = "STEVEDORE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Accept invalid TLS certificates
    #[arg(long)]
    pub insecure: bool,

    /// Comma-separated hosts that bypass the proxy
    #[arg(long)]
    pub noproxy: Option<String>,

    /// Suppress status output
    #[arg(short, long)]
    pub quiet: bool,

    /// Upload all files concurrently
    #[arg(long)]
    pub parallel: bool,

    /// Upload only the artifact and its checksums
    #[arg(long)]
    pub no_metadata: bool,

    /// Staging directory for descriptors and checksums
    #[arg(long)]
    pub pom_dir: Option<PathBuf>,

    /// Upload transport
    #[arg(long, value_parser = parse_transport)]
    pub transport: Option<TransportKind>,

    /// Working directory for the curl transport
    #[arg(long)]
    pub cwd: Option<PathBuf>,

    /// Stage files and print the upload plan without uploading
    #[arg(long)]
    pub dry_run: bool,
}

fn parse_transport(s: &str) -> Result<TransportKind, String> {
    s.parse().map_err(|e: stevedore_util::errors::StevedoreError| e.to_string())
}

/// Parse command-line arguments into a [`Cli`] struct.
pub fn parse() -> Cli {
    Cli::parse()
}
