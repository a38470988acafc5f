//! Local staging directory for descriptors and checksum side-files.
//!
//! Layout inside the staging directory:
//!
//! ```text
//! outer.xml   outer.xml.md5   outer.xml.sha1
//! inner.xml   inner.xml.md5   inner.xml.sha1
//! pom.xml     pom.xml.md5     pom.xml.sha1
//!             artifact.<packaging>.md5   artifact.<packaging>.sha1
//! ```
//!
//! The binary itself is uploaded from where it was built and is not copied.

use std::path::{Path, PathBuf};

use stevedore_util::errors::StevedoreError;
use stevedore_util::fs::{ensure_dir, write_file};
use stevedore_util::hash::Digests;

use crate::descriptor::Descriptors;
use crate::layout::{Checksum, FileRole, Slot};

pub const OUTER_FILE: &str = "outer.xml";
pub const INNER_FILE: &str = "inner.xml";
pub const POM_FILE: &str = "pom.xml";

/// A directory holding the staged files of one publish.
#[derive(Debug, Clone)]
pub struct StagingArea {
    dir: PathBuf,
}

impl StagingArea {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `name` and its `.md5` / `.sha1` side-files, creating the
    /// directory if needed.
    pub fn stage(&self, name: &str, content: &[u8]) -> Result<Digests, StevedoreError> {
        let path = self.dir.join(name);
        write_file(&path, content).map_err(|e| staging_error(&path, e))?;
        let digests = Digests::of(content);
        self.write_digests(name, &digests)?;
        Ok(digests)
    }

    /// Stage all three descriptors.
    pub fn stage_descriptors(&self, descriptors: &Descriptors) -> Result<(), StevedoreError> {
        self.stage(OUTER_FILE, descriptors.outer.as_bytes())?;
        self.stage(INNER_FILE, descriptors.inner.as_bytes())?;
        self.stage(POM_FILE, descriptors.pom.as_bytes())?;
        Ok(())
    }

    /// Digest the binary and write its side-files as `artifact.<packaging>.*`.
    pub fn stage_artifact_digests(
        &self,
        artifact: &Path,
        packaging: &str,
    ) -> Result<Digests, StevedoreError> {
        let digests = Digests::of_file(artifact).map_err(|e| staging_error(artifact, e))?;
        self.write_digests(&artifact_file(packaging), &digests)?;
        Ok(digests)
    }

    fn write_digests(&self, name: &str, digests: &Digests) -> Result<(), StevedoreError> {
        ensure_dir(&self.dir).map_err(|e| staging_error(&self.dir, e))?;
        for (checksum, value) in [(Checksum::Md5, &digests.md5), (Checksum::Sha1, &digests.sha1)] {
            let path = self.dir.join(format!("{name}.{}", checksum.extension()));
            std::fs::write(&path, value).map_err(|e| staging_error(&path, e))?;
        }
        Ok(())
    }

    /// Local file that fills `slot`.
    ///
    /// The binary's content slot is the artifact path itself; its checksums
    /// live in the staging directory.
    pub fn local_path(&self, slot: Slot, artifact: &Path, packaging: &str) -> PathBuf {
        let base = match slot.role {
            FileRole::OuterMetadata => OUTER_FILE.to_string(),
            FileRole::InnerMetadata => INNER_FILE.to_string(),
            FileRole::Pom => POM_FILE.to_string(),
            FileRole::Artifact if slot.checksum.is_none() => return artifact.to_path_buf(),
            FileRole::Artifact => artifact_file(packaging),
        };
        match slot.checksum {
            Some(c) => self.dir.join(format!("{base}.{}", c.extension())),
            None => self.dir.join(base),
        }
    }
}

fn artifact_file(packaging: &str) -> String {
    format!("artifact.{packaging}")
}

fn staging_error(path: &Path, err: std::io::Error) -> StevedoreError {
    StevedoreError::Staging {
        message: format!("{}: {err}", path.display()),
    }
}
