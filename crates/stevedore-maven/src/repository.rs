//! Remote repository: base URL plus pass-through connection settings.

use stevedore_core::options::{Credentials, PublishOptions, PublishRequest};

/// Hosts that skip the proxy when nothing else is configured.
pub const DEFAULT_NOPROXY: &str = "127.0.0.1";

/// A publish target with its credentials and connection settings.
///
/// None of the settings are interpreted here; they are forwarded to
/// whichever transport performs the uploads.
#[derive(Debug, Clone)]
pub struct RemoteRepository {
    pub url: String,
    pub credentials: Option<Credentials>,
    /// Accept any TLS certificate.
    pub insecure: bool,
    /// Comma-separated proxy bypass list.
    pub noproxy: String,
}

impl RemoteRepository {
    /// A repository at `url` with no credentials and default settings.
    pub fn new(url: &str) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            credentials: None,
            insecure: false,
            noproxy: DEFAULT_NOPROXY.to_string(),
        }
    }

    /// Build from validated options.
    pub fn from_options(request: &PublishRequest, options: &PublishOptions) -> Self {
        Self {
            credentials: options.auth.clone(),
            insecure: options.insecure,
            noproxy: options
                .noproxy
                .clone()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_NOPROXY.to_string()),
            ..Self::new(&request.url)
        }
    }

    /// Full URI of a remote key.
    pub fn uri_for(&self, key: &str) -> String {
        format!("{}/{}", self.url, key.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn options() -> PublishOptions {
        PublishOptions {
            group_id: Some("com.example".into()),
            artifact_id: Some("widget".into()),
            version: Some("1.0.0".into()),
            artifact: Some(PathBuf::from("widget.jar")),
            packaging: Some("jar".into()),
            url: Some("https://nexus.example.com/repository/releases/".into()),
            ..Default::default()
        }
    }

    #[test]
    fn uri_for_joins_with_single_slash() {
        let repo = RemoteRepository::new("https://repo.example.com/maven2/");
        assert_eq!(
            repo.uri_for("com/example/widget/maven-metadata.xml"),
            "https://repo.example.com/maven2/com/example/widget/maven-metadata.xml"
        );
    }

    #[test]
    fn from_options_without_auth() {
        let opts = options();
        let repo = RemoteRepository::from_options(&opts.validate().unwrap(), &opts);
        assert_eq!(repo.url, "https://nexus.example.com/repository/releases");
        assert!(repo.credentials.is_none());
        assert_eq!(repo.noproxy, DEFAULT_NOPROXY);
        assert!(!repo.insecure);
    }

    #[test]
    fn from_options_forwards_settings() {
        let mut opts = options();
        opts.auth = Some(Credentials {
            username: "deployer".into(),
            password: "secret".into(),
        });
        opts.insecure = true;
        opts.noproxy = Some("localhost,.corp".into());
        let repo = RemoteRepository::from_options(&opts.validate().unwrap(), &opts);
        assert_eq!(
            repo.credentials.as_ref().map(|c| c.username.as_str()),
            Some("deployer")
        );
        assert!(repo.insecure);
        assert_eq!(repo.noproxy, "localhost,.corp");
    }
}
