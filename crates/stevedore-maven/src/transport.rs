//! Upload transports.
//!
//! A [`Transport`] puts one local file at one remote key and reports the
//! HTTP status it got back. Whether that status counts as success is the
//! orchestrator's decision, not the transport's.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::header::CONTENT_LENGTH;
use reqwest::{Body, Client, NoProxy, Proxy};
use thiserror::Error;

use stevedore_core::options::TransportKind;
use stevedore_util::errors::StevedoreError;
use stevedore_util::process::CommandBuilder;

use crate::auth;
use crate::repository::RemoteRepository;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Environment variables consulted for an outbound proxy, in priority order.
const PROXY_ENV_VARS: [&str; 6] = [
    "HTTPS_PROXY",
    "https_proxy",
    "HTTP_PROXY",
    "http_proxy",
    "ALL_PROXY",
    "all_proxy",
];

/// Why a single upload failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    /// The remote answered with something other than 200 or 201.
    #[error("Status code {status} for {target}")]
    Status { status: u16, target: String },

    /// The upload process exited unsuccessfully.
    #[error("Upload process exited with {} for {target}", exit_label(.code))]
    Exit { code: Option<i32>, target: String },

    /// The request never produced a status (connection, I/O, timeout).
    #[error("Upload to {target} failed: {message}")]
    Connector { target: String, message: String },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("code {c}"),
        None => "a signal".to_string(),
    }
}

/// Puts local files into the remote repository.
pub trait Transport: Send + Sync {
    /// Upload `local` to `remote_key`, returning the response status.
    fn upload(
        &self,
        local: &Path,
        remote_key: &str,
    ) -> impl Future<Output = Result<u16, UploadError>> + Send;

    /// Human-readable destination of `remote_key`, for status lines and errors.
    fn target(&self, remote_key: &str) -> String {
        remote_key.to_string()
    }
}

/// Uploads with an HTTP `PUT` per file.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    repo: RemoteRepository,
}

impl HttpTransport {
    pub fn new(repo: RemoteRepository) -> Result<Self, StevedoreError> {
        let mut builder = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("stevedore/", env!("CARGO_PKG_VERSION")))
            .danger_accept_invalid_certs(repo.insecure);

        if let Some(proxy_url) = env_proxy() {
            let proxy = Proxy::all(&proxy_url)
                .map_err(|e| StevedoreError::Transport {
                    message: format!("Invalid proxy '{proxy_url}': {e}"),
                })?
                .no_proxy(NoProxy::from_string(&repo.noproxy));
            builder = builder.proxy(proxy);
        }

        let client = builder.build().map_err(|e| StevedoreError::Transport {
            message: format!("Failed to create HTTP client: {e}"),
        })?;
        Ok(Self { client, repo })
    }
}

fn env_proxy() -> Option<String> {
    PROXY_ENV_VARS
        .iter()
        .find_map(|k| std::env::var(k).ok().filter(|v| !v.trim().is_empty()))
}

impl Transport for HttpTransport {
    async fn upload(&self, local: &Path, remote_key: &str) -> Result<u16, UploadError> {
        let uri = self.repo.uri_for(remote_key);
        let connector = |message: String| UploadError::Connector {
            target: uri.clone(),
            message,
        };

        let unreadable =
            |e: std::io::Error| connector(format!("cannot read {}: {e}", local.display()));
        let file = tokio::fs::File::open(local).await.map_err(unreadable)?;
        let len = file.metadata().await.map_err(unreadable)?.len();

        let request = auth::apply_auth(self.client.put(&uri), &self.repo)
            .header(CONTENT_LENGTH, len)
            .body(Body::from(file));
        let response = request.send().await.map_err(|e| connector(e.to_string()))?;
        Ok(response.status().as_u16())
    }

    fn target(&self, remote_key: &str) -> String {
        self.repo.uri_for(remote_key)
    }
}

/// Uploads by running `curl --upload-file` once per file.
#[derive(Debug, Clone)]
pub struct CurlTransport {
    repo: RemoteRepository,
    program: String,
    cwd: Option<PathBuf>,
}

impl CurlTransport {
    pub fn new(repo: RemoteRepository) -> Self {
        Self {
            repo,
            program: "curl".to_string(),
            cwd: None,
        }
    }

    /// Run curl from a specific working directory.
    pub fn with_cwd(mut self, cwd: Option<PathBuf>) -> Self {
        self.cwd = cwd;
        self
    }

    /// Use a different curl binary.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// The command that uploads `local` to `uri`.
    pub fn command(&self, local: &Path, uri: &str) -> CommandBuilder {
        let mut cmd = CommandBuilder::new(&self.program)
            .args(["--silent", "--write-out", "%{http_code}", "--upload-file"])
            .arg(local.to_string_lossy())
            .args(["--noproxy", self.repo.noproxy.as_str()]);
        if let Some(credentials) = auth::user_colon_password(&self.repo) {
            cmd = cmd.args(["-u".to_string(), credentials]);
        }
        if self.repo.insecure {
            cmd = cmd.arg("--insecure");
        }
        if let Some(ref dir) = self.cwd {
            cmd = cmd.cwd(dir);
        }
        cmd.arg(uri)
    }
}

impl Transport for CurlTransport {
    async fn upload(&self, local: &Path, remote_key: &str) -> Result<u16, UploadError> {
        let uri = self.repo.uri_for(remote_key);
        let output = self
            .command(local, &uri)
            .exec()
            .await
            .map_err(|e| UploadError::Connector {
                target: uri.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(UploadError::Exit {
                code: output.status.code(),
                target: uri,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let written = stdout.trim().trim_matches('"');
        written.parse::<u16>().map_err(|_| UploadError::Connector {
            target: uri.clone(),
            message: format!("unexpected curl output '{written}'"),
        })
    }

    fn target(&self, remote_key: &str) -> String {
        self.repo.uri_for(remote_key)
    }
}

/// A transport chosen at runtime from configuration.
#[derive(Debug, Clone)]
pub enum AnyTransport {
    Http(HttpTransport),
    Curl(CurlTransport),
}

impl AnyTransport {
    pub fn from_kind(
        kind: TransportKind,
        repo: RemoteRepository,
        cwd: Option<PathBuf>,
    ) -> Result<Self, StevedoreError> {
        Ok(match kind {
            TransportKind::Http => Self::Http(HttpTransport::new(repo)?),
            TransportKind::Curl => Self::Curl(CurlTransport::new(repo).with_cwd(cwd)),
        })
    }
}

impl Transport for AnyTransport {
    async fn upload(&self, local: &Path, remote_key: &str) -> Result<u16, UploadError> {
        match self {
            Self::Http(t) => t.upload(local, remote_key).await,
            Self::Curl(t) => t.upload(local, remote_key).await,
        }
    }

    fn target(&self, remote_key: &str) -> String {
        match self {
            Self::Http(t) => t.target(remote_key),
            Self::Curl(t) => t.target(remote_key),
        }
    }
}
