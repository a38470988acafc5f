//! Operation: publish one artifact and its descriptors to a remote repository.
//!
//! Steps, in order: validate options, render descriptors, stage descriptors
//! and digests, resolve remote keys, upload. Invalid options and staging
//! failures abort before anything is sent.

use std::path::Path;

use stevedore_core::options::{PublishOptions, PublishRequest};
use stevedore_core::template::{BraceRenderer, Renderer};
use stevedore_maven::descriptor::Materializer;
use stevedore_maven::layout;
use stevedore_maven::repository::RemoteRepository;
use stevedore_maven::staging::StagingArea;
use stevedore_maven::transport::{AnyTransport, Transport};
use stevedore_maven::upload::{ConcurrencyMode, PublishOutcome, UploadSet, Uploader};
use stevedore_util::progress::{status, status_error};

/// Publish with the transport named in `options` and the default renderer.
///
/// Returns `Ok(true)` when every upload succeeded, `Ok(false)` when any
/// upload failed, and `Err` for invalid options or staging failures.
pub async fn publish(options: &PublishOptions) -> miette::Result<bool> {
    let request = options.validate()?;
    let repo = RemoteRepository::from_options(&request, options);
    let transport = AnyTransport::from_kind(options.transport, repo, options.cwd.clone())?;
    let outcome = run(options, &request, &transport, &BraceRenderer::default()).await?;
    Ok(outcome.is_success())
}

/// Publish through caller-supplied collaborators.
pub async fn publish_with<T: Transport, R: Renderer>(
    options: &PublishOptions,
    transport: &T,
    renderer: &R,
) -> miette::Result<PublishOutcome> {
    let request = options.validate()?;
    run(options, &request, transport, renderer).await
}

/// Render and stage everything, then return the upload set without sending it.
pub fn plan<R: Renderer>(options: &PublishOptions, renderer: &R) -> miette::Result<UploadSet> {
    let request = options.validate()?;
    Ok(stage(options.pom_dir(), &request, renderer)?)
}

fn stage<R: Renderer>(
    pom_dir: &Path,
    request: &PublishRequest,
    renderer: &R,
) -> Result<UploadSet, stevedore_util::errors::StevedoreError> {
    let coords = &request.coordinates;
    let descriptors = Materializer::new(renderer).materialize(coords)?;

    let staging = StagingArea::new(pom_dir);
    staging.stage_descriptors(&descriptors)?;
    staging.stage_artifact_digests(&request.artifact, &coords.packaging)?;
    tracing::debug!("Staged descriptors in {}", staging.dir().display());

    let entries = layout::resolve(coords);
    UploadSet::build(&entries, &staging, &request.artifact, &coords.packaging)
}

async fn run<T: Transport, R: Renderer>(
    options: &PublishOptions,
    request: &PublishRequest,
    transport: &T,
    renderer: &R,
) -> miette::Result<PublishOutcome> {
    let uploads = stage(options.pom_dir(), request, renderer)?;
    let coordinate = request.coordinates.display_coordinate();
    tracing::info!("Publishing {coordinate} ({} files)", uploads.len());

    let outcome = Uploader::new(transport, ConcurrencyMode::from_parallel(options.parallel))
        .quiet(options.quiet)
        .publish(&uploads)
        .await;

    if !options.quiet {
        match &outcome.first_error {
            None => status("Published", &format!("{coordinate} to {}", request.url)),
            Some(err) => status_error("error", &format!("Artifact upload failed: {err}")),
        }
    }
    Ok(outcome)
}
