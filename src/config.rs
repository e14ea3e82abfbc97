//! Configuration for the module mapper
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{MapperError, Result};

/// Environment variable carrying the cross-compile prefix
pub const CROSS_COMPILE_ENV: &str = "CROSS_COMPILE";

/// Environment variable carrying the repository directory
pub const REPO_DIR_ENV: &str = "CMI_REPO_DIR";

/// Environment variable carrying the base compiler executable
pub const COMPILER_ENV: &str = "CMI_COMPILER";

/// Environment variable carrying the language standard
pub const STD_ENV: &str = "CMI_STD";

/// Environment variable carrying the source directory
pub const SOURCE_DIR_ENV: &str = "CMI_SOURCE_DIR";

/// Main configuration for one mapper process
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Repository Configuration
    // -------------------------------------------------------------------------
    /// Root directory for cached interface artifacts
    /// Internal structure (no build identity):
    ///   {repo_dir}/
    ///     └── ab/cd/abcd...-g++.cmi
    /// With a build identity the keys are stored flat:
    ///   {repo_dir}/abcd...-debug-g++
    pub repo_dir: PathBuf,

    // -------------------------------------------------------------------------
    // Toolchain Configuration
    // -------------------------------------------------------------------------
    /// Executable prefix selecting a cross compiler (e.g. `aarch64-linux-gnu-`)
    pub cross_compile_prefix: String,

    /// Base compiler executable, appended to the cross-compile prefix
    pub compiler: String,

    /// Language standard passed as `-std=...`
    pub language_standard: String,

    /// Program the compiler spawns as its module mapper
    pub mapper_command: String,

    // -------------------------------------------------------------------------
    // Source Configuration
    // -------------------------------------------------------------------------
    /// Directory that relative source locators resolve against
    /// (`None` means the process working directory)
    pub source_dir: Option<PathBuf>,

    /// Suffix appended to a module name to find its source file
    pub source_suffix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repo_dir: PathBuf::from(".modules-cmi"),
            cross_compile_prefix: String::new(),
            compiler: "g++".to_string(),
            language_standard: "c++20".to_string(),
            mapper_command: "gcc-module-cmi-builder".to_string(),
            source_dir: None,
            source_suffix: ".cpp".to_string(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Reject settings that cannot produce a compiler command
    pub fn validate(&self) -> Result<()> {
        if self.compiler.is_empty() {
            return Err(MapperError::Config("compiler executable is empty".to_string()));
        }
        if self.language_standard.is_empty() {
            return Err(MapperError::Config("language standard is empty".to_string()));
        }
        if self.mapper_command.is_empty() {
            return Err(MapperError::Config("mapper command is empty".to_string()));
        }
        if self.cross_compile_prefix.chars().any(char::is_whitespace) {
            return Err(MapperError::Config(format!(
                "cross-compile prefix {:?} contains whitespace",
                self.cross_compile_prefix
            )));
        }
        Ok(())
    }

    /// Full compiler executable name, including any cross-compile prefix
    pub fn compiler_executable(&self) -> String {
        format!("{}{}", self.cross_compile_prefix, self.compiler)
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the repository directory (root for all cached artifacts)
    pub fn repo_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.repo_dir = path.into();
        self
    }

    /// Set the cross-compile executable prefix
    pub fn cross_compile_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.cross_compile_prefix = prefix.into();
        self
    }

    /// Set the base compiler executable
    pub fn compiler(mut self, compiler: impl Into<String>) -> Self {
        self.config.compiler = compiler.into();
        self
    }

    /// Set the language standard
    pub fn language_standard(mut self, standard: impl Into<String>) -> Self {
        self.config.language_standard = standard.into();
        self
    }

    /// Set the program the compiler should call back into
    pub fn mapper_command(mut self, command: impl Into<String>) -> Self {
        self.config.mapper_command = command.into();
        self
    }

    /// Set the directory that source files are resolved against
    pub fn source_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.source_dir = Some(path.into());
        self
    }

    /// Set the module source file suffix
    pub fn source_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.config.source_suffix = suffix.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
