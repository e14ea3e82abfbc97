//! Build Dispatcher
//!
//! Resolves module requests to artifact paths, rebuilding stale artifacts.
//!
//! ## Import Steps
//! 1. Derive the relative artifact path from the cache key
//! 2. Create the artifact's parent directory
//! 3. Classify the module (module unit or header unit)
//! 4. Skip the build if the artifact is newer than its source
//! 5. Otherwise run the compiler and wait for it

use std::path::{Path, PathBuf};

use crate::cache::{artifact_path, check_module_name, ClientIdentity, KeyContext, Repository};
use crate::config::Config;
use crate::error::Result;
use crate::protocol::Word;
use super::{classify_module, Compiler, Invocation, ProcessCompiler};

/// Owns the configuration, repository, and compiler for one session
pub struct BuildDispatcher<C = ProcessCompiler> {
    /// Mapper configuration
    config: Config,

    /// Where artifacts live
    repository: Repository,

    /// Runs compiler invocations
    compiler: C,
}

impl BuildDispatcher<ProcessCompiler> {
    /// Create a dispatcher that runs the real compiler
    pub fn with_process_compiler(config: Config) -> Self {
        Self::new(config, ProcessCompiler)
    }
}

impl<C: Compiler> BuildDispatcher<C> {
    pub fn new(config: Config, compiler: C) -> Self {
        let repository = Repository::new(config.repo_dir.clone());
        Self {
            config,
            repository,
            compiler,
        }
    }

    pub fn compiler(&self) -> &C {
        &self.compiler
    }

    /// Create the repository root if needed and return its absolute path
    pub fn repository_root(&self) -> Result<PathBuf> {
        self.repository.ensure_root()
    }

    /// Repository-relative artifact path for a module; touches nothing on disk
    pub fn export_path(&self, name: &Word, client: &ClientIdentity) -> Result<PathBuf> {
        check_module_name(name.as_bytes())?;
        let ctx = KeyContext::new(&self.config.cross_compile_prefix, client);
        Ok(artifact_path(name, &ctx))
    }

    /// Make sure a current artifact exists for `name` and return its
    /// repository-relative path
    pub fn import(&mut self, name: &Word, client: &ClientIdentity) -> Result<PathBuf> {
        let relative = self.export_path(name, client)?;
        let artifact = self.repository.prepare_artifact(&relative)?;

        let (source, mode) = classify_module(name, &self.config.source_suffix);
        let source = self.resolve_source(&source);

        let freshness = self.repository.freshness(&artifact, &source)?;
        if !freshness.needs_build() {
            tracing::debug!(module = %name, artifact = %artifact.display(), "artifact up to date");
            return Ok(relative);
        }

        let invocation = Invocation::new(&self.config, mode, &source);
        tracing::info!(module = %name, ?mode, ?freshness, "compile {}", invocation);
        self.compiler.compile(&name.to_string_lossy(), &invocation)?;

        Ok(relative)
    }

    fn resolve_source(&self, source: &Path) -> PathBuf {
        match &self.config.source_dir {
            Some(dir) => dir.join(source),
            None => source.to_path_buf(),
        }
    }
}
