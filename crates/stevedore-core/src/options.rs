//! Caller-facing publish options and their validation.
//!
//! Options arrive from `Stevedore.toml`, the command line, or a library
//! caller. Every field is optional at this layer so the sources can be
//! layered; [`PublishOptions::validate`] turns them into a checked
//! [`PublishRequest`] before any file is written or any request is sent.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use stevedore_util::errors::StevedoreError;

use crate::coordinates::{BuildTime, PublishCoordinates, Version};

/// Staging directory used when none is configured.
pub const DEFAULT_POM_DIR: &str = "target/stevedore/poms";

/// Which transport performs the individual uploads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// Native HTTP client.
    #[default]
    Http,
    /// An external `curl` process per file.
    Curl,
}

impl std::str::FromStr for TransportKind {
    type Err = StevedoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "curl" => Ok(Self::Curl),
            other => Err(StevedoreError::InvalidOptions {
                message: format!("unknown transport '{other}' (expected 'http' or 'curl')"),
            }),
        }
    }
}

/// Repository credentials, forwarded to the transport untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Everything a caller can say about one publish.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PublishOptions {
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub artifact_id: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    /// Local path of the built binary.
    #[serde(default)]
    pub artifact: Option<PathBuf>,
    #[serde(default)]
    pub packaging: Option<String>,
    #[serde(default)]
    pub classifier: Option<String>,
    #[serde(default)]
    pub build_time: Option<String>,
    #[serde(default)]
    pub build_number: Option<String>,
    /// Base URL of the remote repository.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub auth: Option<Credentials>,
    #[serde(default)]
    pub insecure: bool,
    /// Comma-separated hosts that bypass any configured proxy.
    #[serde(default)]
    pub noproxy: Option<String>,
    #[serde(default)]
    pub quiet: bool,
    #[serde(default)]
    pub parallel: bool,
    #[serde(default = "default_true")]
    pub upload_metadata: bool,
    #[serde(default = "default_pom_dir")]
    pub pom_dir: PathBuf,
    #[serde(default)]
    pub transport: TransportKind,
    /// Working directory for process-based transports.
    #[serde(default)]
    pub cwd: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

fn default_pom_dir() -> PathBuf {
    PathBuf::from(DEFAULT_POM_DIR)
}

impl Default for PublishOptions {
    fn default() -> Self {
        Self {
            group_id: None,
            artifact_id: None,
            version: None,
            artifact: None,
            packaging: None,
            classifier: None,
            build_time: None,
            build_number: None,
            url: None,
            auth: None,
            insecure: false,
            noproxy: None,
            quiet: false,
            parallel: false,
            upload_metadata: true,
            pom_dir: default_pom_dir(),
            transport: TransportKind::default(),
            cwd: None,
        }
    }
}

/// Validated options: the coordinates plus where the bytes come from and go to.
#[derive(Debug, Clone)]
pub struct PublishRequest {
    pub coordinates: PublishCoordinates,
    pub artifact: PathBuf,
    pub url: String,
}

impl PublishOptions {
    /// Check required fields and derive the publish coordinates.
    ///
    /// The snapshot classification and the build time are resolved here,
    /// once, and carried by the returned coordinates.
    pub fn validate(&self) -> Result<PublishRequest, StevedoreError> {
        let group_id = required(&self.group_id, "groupId")?;
        let artifact_id = required(&self.artifact_id, "artifactId")?;
        let version = Version::new(required(&self.version, "version")?);
        let artifact = self
            .artifact
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| missing("artifact"))?;
        let packaging = required(&self.packaging, "packaging")?;
        let url = required(&self.url, "url")?;

        let build_number = self
            .build_number
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        if version.is_snapshot() && build_number.is_none() {
            return Err(StevedoreError::InvalidOptions {
                message: format!("buildNumber is required for snapshot version {version}"),
            });
        }

        let build_time = BuildTime::resolve(self.build_time.as_deref())?;
        let classifier = self
            .classifier
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(PublishRequest {
            coordinates: PublishCoordinates {
                group_id,
                artifact_id,
                version,
                classifier,
                packaging,
                build_time,
                build_number,
                upload_metadata: self.upload_metadata,
            },
            artifact: artifact.to_path_buf(),
            url: url.trim_end_matches('/').to_string(),
        })
    }

    /// The staging directory for descriptors and digests.
    pub fn pom_dir(&self) -> &Path {
        &self.pom_dir
    }
}

fn required(value: &Option<String>, name: &str) -> Result<String, StevedoreError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| missing(name))
}

fn missing(name: &str) -> StevedoreError {
    StevedoreError::InvalidOptions {
        message: format!("{name} is required"),
    }
}
