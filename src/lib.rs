//! # gcc-module-cmi-builder
//!
//! A module mapper for GCC's C++20 modules support:
//! - Speaks the module mapper protocol over stdin/stdout
//! - Builds compiled module interfaces (CMIs) on demand
//! - Caches them under content-addressed keys
//! - Skips rebuilds while an artifact is newer than its source
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Compiler (g++ -fmodule-mapper=|...)         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ stdin / stdout
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                 Wire Codec (protocol)                        │
//! │            BlockReader  /  write_block                       │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                    Conversation                              │
//! │        (handshake gate, one reply block per request)         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  Cache Key  │          │   Build     │
//!   │  (SHA-256)  │◄─────────│ Dispatcher  │
//!   └─────────────┘          └──────┬──────┘
//!                                   │
//!                                   ▼
//!                           ┌─────────────┐
//!                           │  g++ child  │
//!                           │ (recurses)  │
//!                           └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod cache;
pub mod build;
pub mod conversation;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{MapperError, Result};
pub use config::Config;
pub use conversation::{Conversation, Phase};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of the mapper
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
