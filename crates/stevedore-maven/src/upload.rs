//! Upload orchestration: turn resolved remote entries into upload tasks,
//! run them in series or in parallel, and fold the results into one outcome.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use futures_util::stream::{FuturesUnordered, StreamExt};
use indicatif::ProgressBar;

use stevedore_util::errors::StevedoreError;
use stevedore_util::progress;

use crate::layout::RemoteEntry;
use crate::staging::StagingArea;
use crate::transport::{Transport, UploadError};

/// How upload tasks are scheduled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConcurrencyMode {
    /// One task at a time; the first failure stops the rest.
    #[default]
    Series,
    /// All tasks at once; every task runs to completion.
    Parallel,
}

impl ConcurrencyMode {
    pub fn from_parallel(parallel: bool) -> Self {
        if parallel {
            Self::Parallel
        } else {
            Self::Series
        }
    }
}

/// One local file and the remote key it is uploaded to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTask {
    pub local: PathBuf,
    pub remote_key: String,
}

/// Upload tasks for one publish. Local files and remote keys are each unique.
#[derive(Debug, Clone, Default)]
pub struct UploadSet {
    tasks: Vec<UploadTask>,
    locals: HashSet<PathBuf>,
    keys: HashSet<String>,
}

impl UploadSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a task, rejecting a local file or remote key already present.
    pub fn insert(
        &mut self,
        local: impl Into<PathBuf>,
        remote_key: impl Into<String>,
    ) -> Result<(), StevedoreError> {
        let local = local.into();
        let remote_key = remote_key.into();
        if self.locals.contains(&local) {
            return Err(StevedoreError::Staging {
                message: format!("{} is mapped to more than one remote key", local.display()),
            });
        }
        if self.keys.contains(&remote_key) {
            return Err(StevedoreError::Staging {
                message: format!("remote key {remote_key} is targeted twice"),
            });
        }
        self.locals.insert(local.clone());
        self.keys.insert(remote_key.clone());
        self.tasks.push(UploadTask { local, remote_key });
        Ok(())
    }

    /// Map resolved remote entries onto files in the staging area.
    pub fn build(
        entries: &[RemoteEntry],
        staging: &StagingArea,
        artifact: &Path,
        packaging: &str,
    ) -> Result<Self, StevedoreError> {
        let mut set = Self::new();
        for entry in entries {
            set.insert(staging.local_path(entry.slot, artifact, packaging), entry.key.as_str())?;
        }
        Ok(set)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UploadTask> {
        self.tasks.iter()
    }
}

/// Aggregate result of a publish.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishOutcome {
    /// Tasks handed to the transport.
    pub attempted: usize,
    /// Tasks that got a 200 or 201.
    pub succeeded: usize,
    /// First failure, in the order failures were observed.
    pub first_error: Option<UploadError>,
}

impl PublishOutcome {
    pub fn is_success(&self) -> bool {
        self.first_error.is_none()
    }

    fn record(&mut self, result: Result<(), UploadError>) {
        match result {
            Ok(()) => self.succeeded += 1,
            Err(e) => {
                if self.first_error.is_none() {
                    self.first_error = Some(e);
                }
            }
        }
    }
}

/// Runs an [`UploadSet`] through a [`Transport`].
pub struct Uploader<'t, T: Transport> {
    transport: &'t T,
    mode: ConcurrencyMode,
    quiet: bool,
}

impl<'t, T: Transport> Uploader<'t, T> {
    pub fn new(transport: &'t T, mode: ConcurrencyMode) -> Self {
        Self {
            transport,
            mode,
            quiet: false,
        }
    }

    /// Suppress per-file status lines and the progress bar.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Upload every task and report one outcome. Nothing is retried.
    pub async fn publish(&self, set: &UploadSet) -> PublishOutcome {
        let pb = if self.quiet {
            progress::hidden()
        } else {
            progress::progress_bar(set.len() as u64, "Uploading")
        };

        let mut outcome = PublishOutcome::default();
        match self.mode {
            ConcurrencyMode::Series => {
                for task in set.iter() {
                    outcome.attempted += 1;
                    let result = self.run(task, &pb).await;
                    let failed = result.is_err();
                    outcome.record(result);
                    if failed {
                        break;
                    }
                }
            }
            ConcurrencyMode::Parallel => {
                let mut pending: FuturesUnordered<_> =
                    set.iter().map(|task| self.run(task, &pb)).collect();
                outcome.attempted = pending.len();
                while let Some(result) = pending.next().await {
                    outcome.record(result);
                }
            }
        }
        pb.finish_and_clear();
        outcome
    }

    async fn run(&self, task: &UploadTask, pb: &ProgressBar) -> Result<(), UploadError> {
        let target = self.transport.target(&task.remote_key);
        if !self.quiet {
            pb.suspend(|| progress::status("Uploading", &target));
        }
        tracing::debug!("Uploading {} to {target}", task.local.display());

        let result = match self.transport.upload(&task.local, &task.remote_key).await {
            Ok(200 | 201) => Ok(()),
            Ok(status) => Err(UploadError::Status { status, target }),
            Err(e) => Err(e),
        };
        if let Err(ref e) = result {
            if self.quiet {
                tracing::debug!("{e}");
            } else {
                tracing::warn!("{e}");
            }
        }
        pb.inc(1);
        result
    }
}
