//! Tests for the artifact repository
//!
//! These tests verify:
//! - Root and shard directory creation
//! - Freshness decisions from modification times
//! - Stat failures

use std::fs::{self, File};
use std::path::Path;
use std::time::{Duration, SystemTime};

use cmi_builder::cache::{Freshness, Repository};
use cmi_builder::MapperError;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn touch(path: &Path, mtime: SystemTime) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let file = File::create(path).unwrap();
    file.set_modified(mtime).unwrap();
}

fn hours_ago(hours: u64) -> SystemTime {
    SystemTime::now() - Duration::from_secs(hours * 3600)
}

// =============================================================================
// Directory Tests
// =============================================================================

#[test]
fn test_ensure_root_creates_nested_directory() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("a").join("b").join(".modules-cmi");
    let repo = Repository::new(&root);

    let abs = repo.ensure_root().unwrap();

    assert_eq!(abs, root);
    assert!(root.is_dir());
    // idempotent
    assert_eq!(repo.ensure_root().unwrap(), root);
}

#[test]
fn test_ensure_root_fails_when_path_is_a_file() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("blocker");
    fs::write(&root, b"not a directory").unwrap();

    let err = Repository::new(&root).ensure_root().unwrap_err();

    assert!(matches!(err, MapperError::RepositoryCreate(_)), "got {:?}", err);
    assert!(!err.is_session_fatal());
    assert!(err.to_string().starts_with("failed to create repository dir: "));
}

#[test]
fn test_prepare_artifact_creates_shard_dirs() {
    let temp = TempDir::new().unwrap();
    let repo = Repository::new(temp.path());

    let file = repo.prepare_artifact(Path::new("ab/cd/abcd-gcc.cmi")).unwrap();

    assert_eq!(file, temp.path().join("ab/cd/abcd-gcc.cmi"));
    assert!(temp.path().join("ab").join("cd").is_dir());
    assert!(!file.exists());
}

// =============================================================================
// Freshness Tests
// =============================================================================

#[test]
fn test_missing_artifact_ignores_source() {
    let temp = TempDir::new().unwrap();
    let repo = Repository::new(temp.path());

    let freshness = repo
        .freshness(&temp.path().join("none.cmi"), &temp.path().join("also-missing.cpp"))
        .unwrap();

    assert_eq!(freshness, Freshness::Missing);
    assert!(freshness.needs_build());
}

#[test]
fn test_artifact_newer_than_source_is_fresh() {
    let temp = TempDir::new().unwrap();
    let repo = Repository::new(temp.path());
    let source = temp.path().join("foo.cpp");
    let artifact = temp.path().join("foo.cmi");
    touch(&source, hours_ago(2));
    touch(&artifact, hours_ago(1));

    let freshness = repo.freshness(&artifact, &source).unwrap();

    assert_eq!(freshness, Freshness::Fresh);
    assert!(!freshness.needs_build());
}

#[test]
fn test_artifact_older_than_source_is_stale() {
    let temp = TempDir::new().unwrap();
    let repo = Repository::new(temp.path());
    let source = temp.path().join("foo.cpp");
    let artifact = temp.path().join("foo.cmi");
    touch(&artifact, hours_ago(2));
    touch(&source, hours_ago(1));

    assert_eq!(repo.freshness(&artifact, &source).unwrap(), Freshness::Stale);
}

#[test]
fn test_equal_times_are_stale() {
    let temp = TempDir::new().unwrap();
    let repo = Repository::new(temp.path());
    let source = temp.path().join("foo.cpp");
    let artifact = temp.path().join("foo.cmi");
    let when = hours_ago(1);
    touch(&artifact, when);
    touch(&source, when);

    assert_eq!(repo.freshness(&artifact, &source).unwrap(), Freshness::Stale);
}

#[test]
fn test_missing_source_with_artifact_is_error() {
    let temp = TempDir::new().unwrap();
    let repo = Repository::new(temp.path());
    let artifact = temp.path().join("foo.cmi");
    touch(&artifact, hours_ago(1));

    let err = repo
        .freshness(&artifact, &temp.path().join("gone.cpp"))
        .unwrap_err();

    assert!(matches!(err, MapperError::SourceStat { .. }), "got {:?}", err);
    assert!(err.to_string().starts_with("invalid source file "));
}
