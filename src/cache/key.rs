//! Cache key derivation
//!
//! Maps a module name and the active build configuration to the relative
//! path of its interface artifact inside the repository.

use std::path::PathBuf;

use sha2::{Digest, Sha256};

use crate::error::{MapperError, Result};
use crate::protocol::Word;

/// Extension of sharded artifact files
pub const ARTIFACT_EXTENSION: &str = "cmi";

/// Separates the module name from the cross-compile prefix in the digest input
const PREFIX_SEPARATOR: u8 = 0;

/// Identities announced by the compiler in its handshake
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientIdentity {
    /// Compiler identity (e.g. `gcc`)
    pub compiler: Word,

    /// Opaque build identity; may be empty
    pub build: Word,
}

impl ClientIdentity {
    pub fn new(compiler: impl Into<Word>, build: impl Into<Word>) -> Self {
        Self {
            compiler: compiler.into(),
            build: build.into(),
        }
    }
}

/// Everything a cache key depends on besides the module name
#[derive(Debug, Clone, Copy)]
pub struct KeyContext<'a> {
    pub cross_compile_prefix: &'a str,
    pub client: &'a ClientIdentity,
}

impl<'a> KeyContext<'a> {
    pub fn new(cross_compile_prefix: &'a str, client: &'a ClientIdentity) -> Self {
        Self {
            cross_compile_prefix,
            client,
        }
    }
}

/// Reject module names that cannot be keyed unambiguously.
///
/// The digest input is `name`, then `0x00` and the prefix when one is set.
/// With no NUL inside the name that input splits back into exactly one
/// (name, prefix) pair. No file can be named with a NUL either.
pub fn check_module_name(name: &[u8]) -> Result<()> {
    if name.contains(&PREFIX_SEPARATOR) {
        return Err(MapperError::InvalidModuleName(
            String::from_utf8_lossy(name).into_owned(),
        ));
    }
    Ok(())
}

/// SHA-256 of the module name, salted with the cross-compile prefix when
/// one is configured, as lowercase hex
pub fn module_digest(name: impl AsRef<[u8]>, cross_compile_prefix: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(name.as_ref());
    if !cross_compile_prefix.is_empty() {
        hasher.update([PREFIX_SEPARATOR]);
        hasher.update(cross_compile_prefix.as_bytes());
    }
    hex::encode(hasher.finalize())
}

/// Canonical key: `<digest>-<build>-<compiler>`, or `<digest>-<compiler>`
/// without a build identity
pub fn module_key(name: impl AsRef<[u8]>, ctx: &KeyContext<'_>) -> Word {
    let digest = module_digest(name, ctx.cross_compile_prefix);
    key_from_digest(&digest, ctx.client)
}

fn key_from_digest(digest: &str, client: &ClientIdentity) -> Word {
    let mut key = digest.as_bytes().to_vec();
    if !client.build.is_empty() {
        key.push(b'-');
        key.extend_from_slice(client.build.as_bytes());
    }
    key.push(b'-');
    key.extend_from_slice(client.compiler.as_bytes());
    Word::from(key)
}

/// Relative artifact path for a module
///
/// With a build identity the key is used as a flat file name. Without one
/// the file is sharded by the first two byte pairs of the digest:
/// `ab/cd/abcd...-gcc.cmi`.
pub fn artifact_path(name: impl AsRef<[u8]>, ctx: &KeyContext<'_>) -> PathBuf {
    let digest = module_digest(name, ctx.cross_compile_prefix);
    let key = key_from_digest(&digest, ctx.client);
    if !ctx.client.build.is_empty() {
        return key.to_path_buf();
    }

    let mut file = key.into_bytes();
    file.push(b'.');
    file.extend_from_slice(ARTIFACT_EXTENSION.as_bytes());

    let mut path = PathBuf::from(&digest[..2]);
    path.push(&digest[2..4]);
    path.push(Word::from(file).to_path_buf());
    path
}
