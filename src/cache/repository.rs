//! Artifact Repository
//!
//! The on-disk directory holding cached interface artifacts.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{MapperError, Result};

/// State of a cached artifact relative to its source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// No artifact has been built yet
    Missing,

    /// The source changed after the artifact was written
    Stale,

    /// The artifact is newer than its source
    Fresh,
}

impl Freshness {
    pub fn needs_build(&self) -> bool {
        !matches!(self, Freshness::Fresh)
    }
}

/// Cached artifact storage rooted at one directory
///
/// Artifacts are never removed here; they are only written by the compiler
/// and compared against their sources.
#[derive(Debug, Clone)]
pub struct Repository {
    root: PathBuf,
}

impl Repository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the root if needed and return its absolute path
    pub fn ensure_root(&self) -> Result<PathBuf> {
        let root = if self.root.is_absolute() {
            self.root.clone()
        } else {
            env::current_dir()
                .map_err(MapperError::RepositoryPath)?
                .join(&self.root)
        };
        fs::create_dir_all(&root).map_err(MapperError::RepositoryCreate)?;
        Ok(root)
    }

    /// Location of an artifact given its repository-relative path
    pub fn artifact_file(&self, relative: &Path) -> PathBuf {
        self.root.join(relative)
    }

    /// Create the artifact's parent directories and return its location
    pub fn prepare_artifact(&self, relative: &Path) -> Result<PathBuf> {
        let file = self.artifact_file(relative);
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent).map_err(MapperError::RepositoryCreate)?;
        }
        Ok(file)
    }

    /// Compare an artifact's modification time against its source.
    ///
    /// The source is only examined when an artifact exists; a source that
    /// cannot be stat'ed at that point is an error.
    pub fn freshness(&self, artifact: &Path, source: &Path) -> Result<Freshness> {
        let artifact_meta = match fs::metadata(artifact) {
            Ok(meta) => meta,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Freshness::Missing),
            Err(e) => return Err(artifact_error(artifact, e)),
        };
        let artifact_time = artifact_meta
            .modified()
            .map_err(|e| artifact_error(artifact, e))?;

        let source_time = fs::metadata(source)
            .and_then(|meta| meta.modified())
            .map_err(|e| MapperError::SourceStat {
                path: source.to_path_buf(),
                source: e,
            })?;

        if artifact_time > source_time {
            Ok(Freshness::Fresh)
        } else {
            Ok(Freshness::Stale)
        }
    }
}

fn artifact_error(path: &Path, source: io::Error) -> MapperError {
    MapperError::ArtifactStat {
        path: path.to_path_buf(),
        source,
    }
}
