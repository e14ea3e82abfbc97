//! Compiler runner
//!
//! Runs a compiler invocation to completion.

use std::io;
use std::process::{Command, Stdio};

use crate::error::{MapperError, Result};
use super::Invocation;

/// Something that can carry out a compiler invocation
pub trait Compiler {
    /// Run `invocation` for `module`, blocking until it finishes
    fn compile(&mut self, module: &str, invocation: &Invocation) -> Result<()>;
}

/// Runs the compiler as a child process
///
/// Stdout belongs to the protocol, so both of the child's output streams
/// go to our stderr. The child gets no stdin.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessCompiler;

impl Compiler for ProcessCompiler {
    fn compile(&mut self, module: &str, invocation: &Invocation) -> Result<()> {
        let build_error = |reason: String| MapperError::Build {
            module: module.to_string(),
            reason,
        };

        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .envs(invocation.envs.iter().map(|(key, value)| (*key, value)))
            .stdin(Stdio::null())
            .stdout(io::stderr())
            .stderr(io::stderr())
            .status()
            .map_err(|e| build_error(e.to_string()))?;

        if !status.success() {
            return Err(build_error(status.to_string()));
        }
        Ok(())
    }
}
