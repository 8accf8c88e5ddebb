// system-tests/src/fixtures/install.rs
// ============================================================================
// Module: Install Tree Fixtures
// Description: Builds miniature install trees for cloner and driver tests.
// Purpose: Provide deterministic source trees with a scriptable launcher.
// Dependencies: cds-reloc-core, std
// ============================================================================

//! ## Overview
//! The fake install tree carries the entries the relocation harness cares
//! about: the pinned launcher and runtime library, a module image that must
//! become a symlink, and a handful of ancillary files and directories. The
//! scripted variant swaps the launcher for an executable shell script so
//! driver tests can dictate child output.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::path::PathBuf;

use cds_reloc_core::map_library_name;

// ============================================================================
// SECTION: Tree Shape
// ============================================================================

/// Returns the runtime library path relative to the install root.
#[must_use]
pub fn runtime_library_relative() -> PathBuf {
    PathBuf::from("lib").join("server").join(map_library_name("jvm"))
}

/// Builds a miniature install tree with inert placeholder files.
///
/// The tree contains `bin/java`, `bin/keytool`, the platform-mapped runtime
/// library under `lib/server`, a `lib/modules` image, a nested
/// `conf/security/policy`, and a top-level `release` file.
///
/// # Errors
///
/// Returns an error when any directory or file cannot be created.
pub fn build_install_tree(root: &Path) -> io::Result<()> {
    fs::create_dir_all(root.join("bin"))?;
    fs::create_dir_all(root.join("lib").join("server"))?;
    fs::create_dir_all(root.join("conf").join("security"))?;
    write_executable(&root.join("bin").join("java"), b"#!/bin/sh\nexit 0\n")?;
    write_executable(&root.join("bin").join("keytool"), b"#!/bin/sh\nexit 0\n")?;
    fs::write(root.join(runtime_library_relative()), b"\x7fELF placeholder runtime library")?;
    fs::write(root.join("lib").join("modules"), b"placeholder module image")?;
    fs::write(root.join("conf").join("security").join("policy"), b"grant {};\n")?;
    fs::write(root.join("release"), b"IMPLEMENTOR=\"fixture\"\n")?;
    Ok(())
}

/// Builds an install tree whose launcher runs the given shell body.
///
/// The body runs for every launch, dump and execute alike; its stdout and
/// stderr are what the driver's assertions see.
///
/// # Errors
///
/// Returns an error when the tree or the launcher script cannot be
/// written.
pub fn build_scripted_install(root: &Path, launcher_body: &str) -> io::Result<()> {
    build_install_tree(root)?;
    let script = format!("#!/bin/sh\n{launcher_body}\n");
    write_executable(&root.join("bin").join("java"), script.as_bytes())
}

/// Lists regular files under `root`, as paths relative to it.
///
/// Symlinks are listed but not followed; directories are recursed into.
///
/// # Errors
///
/// Returns an error when a directory cannot be read.
pub fn relative_files(root: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    collect_files(root, Path::new(""), &mut files)?;
    files.sort();
    Ok(files)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Recursively collects regular-file and symlink paths relative to `root`.
fn collect_files(root: &Path, relative: &Path, files: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(root.join(relative))? {
        let entry = entry?;
        let child = relative.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            collect_files(root, &child, files)?;
        } else {
            files.push(child);
        }
    }
    Ok(())
}

/// Writes a file and marks it executable.
fn write_executable(path: &Path, contents: &[u8]) -> io::Result<()> {
    fs::write(path, contents)?;
    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_mode(0o755);
    fs::set_permissions(path, permissions)
}
