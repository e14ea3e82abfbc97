//! Compiler invocation
//!
//! Classifies module references and assembles the compiler command line.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::{
    Config, COMPILER_ENV, CROSS_COMPILE_ENV, REPO_DIR_ENV, SOURCE_DIR_ENV, STD_ENV,
};
use crate::protocol::Word;

/// How a module reference is compiled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    /// A named module built from `<name><suffix>`
    ModuleUnit,

    /// A header unit built from the header path itself
    HeaderUnit,
}

/// Split a module reference into its source locator and build mode.
///
/// Absolute paths and `./`-relative paths are header units; anything else
/// is a module name whose source is the name plus `source_suffix`.
pub fn classify_module(name: impl AsRef<[u8]>, source_suffix: &str) -> (PathBuf, BuildMode) {
    let name = name.as_ref();
    let path = Word::from(name).to_path_buf();
    if path.is_absolute() || is_dot_relative(name) {
        return (path, BuildMode::HeaderUnit);
    }

    let mut source = name.to_vec();
    source.extend_from_slice(source_suffix.as_bytes());
    (Word::from(source).to_path_buf(), BuildMode::ModuleUnit)
}

fn is_dot_relative(name: &[u8]) -> bool {
    name.starts_with(b"./") || (cfg!(windows) && name.starts_with(b".\\"))
}

/// A fully assembled compiler command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Executable (cross-compile prefix + compiler)
    pub program: String,

    /// Arguments, source file last
    pub args: Vec<OsString>,

    /// Variables set on top of the inherited environment
    pub envs: Vec<(&'static str, OsString)>,
}

impl Invocation {
    /// Build the command that compiles `source` in the given mode
    pub fn new(config: &Config, mode: BuildMode, source: &Path) -> Self {
        let mut mapper = OsString::from("-fmodule-mapper=|");
        mapper.push(&config.mapper_command);

        let mut args = vec![
            OsString::from(format!("-std={}", config.language_standard)),
            mapper,
            OsString::from("-fmodules-ts"),
        ];
        match mode {
            BuildMode::ModuleUnit => args.push(OsString::from("-c")),
            BuildMode::HeaderUnit => {
                args.push(OsString::from("-x"));
                args.push(OsString::from("c++-system-header"));
            }
        }
        args.push(source.as_os_str().to_os_string());

        Self {
            program: config.compiler_executable(),
            args,
            envs: mapper_env(config),
        }
    }
}

/// Settings the compiler's own mapper needs to resolve imports the same way
/// this one does
fn mapper_env(config: &Config) -> Vec<(&'static str, OsString)> {
    let mut envs = vec![
        (REPO_DIR_ENV, config.repo_dir.clone().into_os_string()),
        (COMPILER_ENV, OsString::from(&config.compiler)),
        (STD_ENV, OsString::from(&config.language_standard)),
    ];
    if !config.cross_compile_prefix.is_empty() {
        envs.push((CROSS_COMPILE_ENV, OsString::from(&config.cross_compile_prefix)));
    }
    if let Some(dir) = &config.source_dir {
        envs.push((SOURCE_DIR_ENV, dir.clone().into_os_string()));
    }
    envs
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}
