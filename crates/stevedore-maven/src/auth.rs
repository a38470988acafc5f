//! Repository authentication.
//!
//! Credentials come from `[publish.auth]` in `Stevedore.toml` or from the
//! `--username` / `--password` flags (also readable from
//! `STEVEDORE_USERNAME` / `STEVEDORE_PASSWORD`).

use reqwest::RequestBuilder;

use crate::repository::RemoteRepository;

/// Apply basic authentication to a request if the repository has credentials.
pub fn apply_auth(request: RequestBuilder, repo: &RemoteRepository) -> RequestBuilder {
    match &repo.credentials {
        Some(c) => request.basic_auth(&c.username, Some(&c.password)),
        None => request,
    }
}

/// `user:password` for tools that take credentials on the command line.
pub fn user_colon_password(repo: &RemoteRepository) -> Option<String> {
    repo.credentials
        .as_ref()
        .map(|c| format!("{}:{}", c.username, c.password))
}
