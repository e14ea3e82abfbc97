//! Tests for module classification and compiler command lines

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use cmi_builder::build::{classify_module, BuildMode, Invocation};
use cmi_builder::config::{
    Config, COMPILER_ENV, CROSS_COMPILE_ENV, REPO_DIR_ENV, SOURCE_DIR_ENV, STD_ENV,
};

// =============================================================================
// Classification Tests
// =============================================================================

#[test]
fn test_classify_named_module() {
    let (source, mode) = classify_module("foo", ".cpp");
    assert_eq!(source, PathBuf::from("foo.cpp"));
    assert_eq!(mode, BuildMode::ModuleUnit);
}

#[test]
fn test_classify_dotted_module_name() {
    let (source, mode) = classify_module("foo.bar", ".cpp");
    assert_eq!(source, PathBuf::from("foo.bar.cpp"));
    assert_eq!(mode, BuildMode::ModuleUnit);
}

#[test]
fn test_classify_relative_header() {
    let (source, mode) = classify_module("./include/thing.h", ".cpp");
    assert_eq!(source, PathBuf::from("./include/thing.h"));
    assert_eq!(mode, BuildMode::HeaderUnit);
}

#[cfg(unix)]
#[test]
fn test_classify_absolute_header() {
    let (source, mode) = classify_module("/usr/include/c++/13/vector", ".cpp");
    assert_eq!(source, PathBuf::from("/usr/include/c++/13/vector"));
    assert_eq!(mode, BuildMode::HeaderUnit);
}

#[test]
fn test_classify_parent_relative_is_module() {
    // only "./" marks a relative header
    let (_, mode) = classify_module("../foo", ".cpp");
    assert_eq!(mode, BuildMode::ModuleUnit);
}

// =============================================================================
// Invocation Tests
// =============================================================================

#[test]
fn test_module_unit_invocation() {
    let config = Config::builder()
        .repo_dir("/cache")
        .mapper_command("/usr/bin/gcc-module-cmi-builder")
        .build();

    let inv = Invocation::new(&config, BuildMode::ModuleUnit, Path::new("foo.cpp"));

    assert_eq!(inv.program, "g++");
    assert_eq!(
        inv.args,
        vec![
            "-std=c++20",
            "-fmodule-mapper=|/usr/bin/gcc-module-cmi-builder",
            "-fmodules-ts",
            "-c",
            "foo.cpp",
        ]
    );
    assert_eq!(
        inv.envs,
        vec![
            (REPO_DIR_ENV, OsString::from("/cache")),
            (COMPILER_ENV, OsString::from("g++")),
            (STD_ENV, OsString::from("c++20")),
        ]
    );
}

#[test]
fn test_header_unit_invocation() {
    let config = Config::builder().mapper_command("mapper").build();

    let inv = Invocation::new(&config, BuildMode::HeaderUnit, Path::new("./x.h"));

    assert_eq!(
        inv.args,
        vec![
            "-std=c++20",
            "-fmodule-mapper=|mapper",
            "-fmodules-ts",
            "-x",
            "c++-system-header",
            "./x.h",
        ]
    );
    assert_eq!(inv.args.last(), Some(&OsString::from("./x.h")));
}

#[test]
fn test_cross_compile_invocation() {
    let config = Config::builder()
        .cross_compile_prefix("aarch64-linux-gnu-")
        .language_standard("c++23")
        .build();

    let inv = Invocation::new(&config, BuildMode::ModuleUnit, Path::new("m.cpp"));

    assert_eq!(inv.program, "aarch64-linux-gnu-g++");
    assert_eq!(inv.args[0], "-std=c++23");
    assert!(inv
        .envs
        .contains(&(CROSS_COMPILE_ENV, OsString::from("aarch64-linux-gnu-"))));
}

#[test]
fn test_invocation_exports_toolchain_for_nested_mapper() {
    let config = Config::builder()
        .repo_dir("/cache")
        .compiler("clang++")
        .language_standard("c++23")
        .source_dir("/srv/src")
        .build();

    let inv = Invocation::new(&config, BuildMode::ModuleUnit, Path::new("/srv/src/foo.cpp"));

    assert_eq!(
        inv.envs,
        vec![
            (REPO_DIR_ENV, OsString::from("/cache")),
            (COMPILER_ENV, OsString::from("clang++")),
            (STD_ENV, OsString::from("c++23")),
            (SOURCE_DIR_ENV, OsString::from("/srv/src")),
        ]
    );
}

#[cfg(unix)]
#[test]
fn test_non_utf8_header_passed_verbatim() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let name: &[u8] = b"/tmp/caf\xe9.h";
    let (source, mode) = classify_module(name, ".cpp");
    assert_eq!(mode, BuildMode::HeaderUnit);
    assert_eq!(source.as_os_str(), OsStr::from_bytes(name));

    let config = Config::default();
    let inv = Invocation::new(&config, BuildMode::HeaderUnit, &source);
    assert_eq!(inv.args.last().map(OsString::as_os_str), Some(OsStr::from_bytes(name)));
}

#[test]
fn test_invocation_display() {
    let config = Config::builder().mapper_command("m").build();
    let inv = Invocation::new(&config, BuildMode::ModuleUnit, Path::new("a.cpp"));

    assert_eq!(
        inv.to_string(),
        "g++ -std=c++20 -fmodule-mapper=|m -fmodules-ts -c a.cpp"
    );
}

// =============================================================================
// Config Validation Tests
// =============================================================================

#[test]
fn test_default_config_is_valid() {
    assert!(Config::default().validate().is_ok());
}

#[test]
fn test_config_rejects_empty_compiler() {
    let err = Config::builder().compiler("").build().validate().unwrap_err();
    assert!(matches!(err, cmi_builder::MapperError::Config(_)));
}

#[test]
fn test_config_rejects_whitespace_prefix() {
    let config = Config::builder().cross_compile_prefix("arm none-").build();
    assert!(config.validate().is_err());
}
