//! Error types for the module mapper
//!
//! Provides a unified error type for all operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using MapperError
pub type Result<T> = std::result::Result<T, MapperError>;

/// Unified error type for module mapper operations
#[derive(Debug, Error)]
pub enum MapperError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    // -------------------------------------------------------------------------
    // Wire Errors
    // -------------------------------------------------------------------------
    #[error("syntax error at {0:?}")]
    Syntax(String),

    #[error("unexpected end of stream inside an incomplete block")]
    UnexpectedEof,

    #[error("invalid empty message from client")]
    EmptyMessage,

    // -------------------------------------------------------------------------
    // Repository Errors
    // -------------------------------------------------------------------------
    #[error("failed to build repository path: {0}")]
    RepositoryPath(#[source] io::Error),

    #[error("failed to create repository dir: {0}")]
    RepositoryCreate(#[source] io::Error),

    #[error("invalid existing CMI file {}: {source}", .path.display())]
    ArtifactStat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid source file {}: {source}", .path.display())]
    SourceStat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid module name {0:?}: contains a NUL byte")]
    InvalidModuleName(String),

    // -------------------------------------------------------------------------
    // Build Errors
    // -------------------------------------------------------------------------
    #[error("failed to build {module}: {reason}")]
    Build { module: String, reason: String },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl MapperError {
    /// Whether this error ends the whole conversation.
    ///
    /// Everything else is answered with an `ERROR` reply for the one
    /// message that caused it.
    pub fn is_session_fatal(&self) -> bool {
        matches!(
            self,
            MapperError::Io(_)
                | MapperError::Syntax(_)
                | MapperError::UnexpectedEof
                | MapperError::EmptyMessage
        )
    }
}
