//! Exercises `CurlTransport` against stand-in `curl` scripts.
#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tempfile::TempDir;

use stevedore_maven::repository::RemoteRepository;
use stevedore_maven::transport::{CurlTransport, Transport, UploadError};
use stevedore_maven::upload::{ConcurrencyMode, UploadSet, Uploader};

const URL: &str = "https://nexus.example.com/repository/releases";

const STUBS: [(&str, &str); 5] = [
    // Records its arguments in the working directory.
    ("created", "printf '%s\\n' \"$@\" > args.txt\nprintf 201\n"),
    ("quoted", "printf '\"500\"'\n"),
    ("padded", "printf ' 200\\n'\n"),
    ("failing", "exit 7\n"),
    ("garbage", "printf 'curl: (6) Could not resolve host'\n"),
];

/// Writes every stub once, before any test runs one.
fn stub(name: &str) -> String {
    static DIR: OnceLock<TempDir> = OnceLock::new();
    let dir = DIR.get_or_init(|| {
        let dir = TempDir::new().unwrap();
        for (stub, body) in STUBS {
            let path = dir.path().join(stub);
            std::fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        }
        dir
    });
    dir.path().join(name).to_string_lossy().into_owned()
}

fn curl(name: &str) -> CurlTransport {
    CurlTransport::new(RemoteRepository::new(URL)).with_program(stub(name))
}

fn artifact() -> PathBuf {
    PathBuf::from("build/widget.jar")
}

#[tokio::test]
async fn written_status_is_returned() {
    let cwd = TempDir::new().unwrap();
    let transport = curl("created").with_cwd(Some(cwd.path().to_path_buf()));

    let status = transport
        .upload(&artifact(), "com/example/widget/1.0.0/widget-1.0.0.jar")
        .await
        .unwrap();
    assert_eq!(status, 201);

    let args = std::fs::read_to_string(cwd.path().join("args.txt")).unwrap();
    let args: Vec<&str> = args.lines().collect();
    assert!(args.windows(2).any(|w| w == ["--upload-file", "build/widget.jar"]));
    assert_eq!(
        args.last().copied(),
        Some("https://nexus.example.com/repository/releases/com/example/widget/1.0.0/widget-1.0.0.jar")
    );
}

#[tokio::test]
async fn quoted_status_is_unquoted() {
    assert_eq!(curl("quoted").upload(&artifact(), "a.jar").await.unwrap(), 500);
}

#[tokio::test]
async fn surrounding_whitespace_is_trimmed() {
    assert_eq!(curl("padded").upload(&artifact(), "a.jar").await.unwrap(), 200);
}

#[tokio::test]
async fn nonzero_exit_is_an_exit_error() {
    let err = curl("failing").upload(&artifact(), "a.jar").await.unwrap_err();
    assert_eq!(
        err,
        UploadError::Exit {
            code: Some(7),
            target: format!("{URL}/a.jar"),
        }
    );
}

#[tokio::test]
async fn unparseable_output_is_a_connector_error() {
    let err = curl("garbage").upload(&artifact(), "a.jar").await.unwrap_err();
    match err {
        UploadError::Connector { target, message } => {
            assert_eq!(target, format!("{URL}/a.jar"));
            assert!(message.contains("unexpected curl output"), "got: {message}");
        }
        other => panic!("expected a connector error, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_program_is_a_connector_error() {
    let err = curl("absent")
        .upload(Path::new("a.jar"), "a.jar")
        .await
        .unwrap_err();
    assert!(matches!(err, UploadError::Connector { .. }), "got: {err:?}");
}

#[tokio::test]
async fn server_error_through_curl_stops_series_upload() {
    let transport = curl("quoted");
    let mut set = UploadSet::new();
    set.insert("a.pom", "com/example/widget/1.0.0/widget-1.0.0.pom").unwrap();
    set.insert("a.jar", "com/example/widget/1.0.0/widget-1.0.0.jar").unwrap();

    let outcome = Uploader::new(&transport, ConcurrencyMode::Series)
        .quiet(true)
        .publish(&set)
        .await;

    assert_eq!(outcome.attempted, 1);
    assert_eq!(
        outcome.first_error,
        Some(UploadError::Status {
            status: 500,
            target: format!("{URL}/com/example/widget/1.0.0/widget-1.0.0.pom"),
        })
    );
}
