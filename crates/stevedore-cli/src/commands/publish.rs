//! Handler for `stevedore publish`.

use miette::Result;
use stevedore_core::config::StevedoreConfig;
use stevedore_core::options::{Credentials, PublishOptions};
use stevedore_core::template::BraceRenderer;
use stevedore_util::errors::StevedoreError;

use crate::cli::PublishArgs;

pub async fn exec(args: PublishArgs) -> Result<()> {
    let cwd = std::env::current_dir().map_err(StevedoreError::Io)?;
    let config = StevedoreConfig::load(args.config.as_deref(), &cwd)?;
    let dry_run = args.dry_run;
    let options = overlay(config.publish, args);

    if dry_run {
        let uploads = stevedore_ops::ops_publish::plan(&options, &BraceRenderer::default())?;
        for task in uploads.iter() {
            println!("{} -> {}", task.local.display(), task.remote_key);
        }
        return Ok(());
    }

    if stevedore_ops::ops_publish::publish(&options).await? {
        Ok(())
    } else {
        Err(StevedoreError::Publish {
            message: "one or more uploads failed".to_string(),
        }
        .into())
    }
}

/// Command-line values win over `Stevedore.toml`.
fn overlay(mut opts: PublishOptions, args: PublishArgs) -> PublishOptions {
    fn set<T>(slot: &mut Option<T>, value: Option<T>) {
        if value.is_some() {
            *slot = value;
        }
    }

    set(&mut opts.group_id, args.group_id);
    set(&mut opts.artifact_id, args.artifact_id);
    set(&mut opts.version, args.version);
    set(&mut opts.artifact, args.artifact);
    set(&mut opts.packaging, args.packaging);
    set(&mut opts.classifier, args.classifier);
    set(&mut opts.build_time, args.build_time);
    set(&mut opts.build_number, args.build_number);
    set(&mut opts.url, args.url);
    set(&mut opts.noproxy, args.noproxy);
    set(&mut opts.cwd, args.cwd);

    if let Some(username) = args.username {
        let password = args
            .password
            .or_else(|| opts.auth.take().map(|c| c.password))
            .unwrap_or_default();
        opts.auth = Some(Credentials { username, password });
    } else if let (Some(password), Some(auth)) = (args.password, opts.auth.as_mut()) {
        auth.password = password;
    }

    opts.insecure |= args.insecure;
    opts.quiet |= args.quiet;
    opts.parallel |= args.parallel;
    if args.no_metadata {
        opts.upload_metadata = false;
    }
    if let Some(dir) = args.pom_dir {
        opts.pom_dir = dir;
    }
    if let Some(kind) = args.transport {
        opts.transport = kind;
    }
    opts
}
