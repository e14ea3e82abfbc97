//! Cache Module
//!
//! Content-addressed storage for compiled module interfaces (CMIs).
//!
//! ## Layout
//! ```text
//! {repo}/
//!   ├── 3f/a0/3fa0...-gcc.cmi        (no build identity: sharded)
//!   └── 3fa0...-release-gcc          (with build identity: flat)
//! ```
//!
//! Keys are SHA-256 digests of the module name (plus the cross-compile
//! prefix), so the same module under the same configuration always maps to
//! the same file.

mod key;
mod repository;

pub use key::{
    artifact_path, check_module_name, module_digest, module_key, ClientIdentity, KeyContext,
    ARTIFACT_EXTENSION,
};
pub use repository::{Freshness, Repository};
