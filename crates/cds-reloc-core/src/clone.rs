// crates/cds-reloc-core/src/clone.rs
// ============================================================================
// Module: Installation Cloner
// Description: Mirrors an install tree with symlinks plus pinned copies.
// Purpose: Produce a relocated, functionally equivalent runtime install.
// Dependencies: std, thiserror
// ============================================================================

//! ## Overview
//! The cloner walks a source install tree and builds a mirror: directories
//! are created fresh, pinned regular files are copied byte-for-byte, every
//! other regular file becomes a symbolic link back to the absolute source
//! path, and symlinks found in the source are mirrored verbatim without
//! being followed. The destination must be pristine; a pre-existing child
//! aborts the clone. Partial destination trees are never cleaned up, the
//! run directory is assumed disposable.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io;
use std::os::unix::fs as unix_fs;
use std::path::Path;
use std::path::PathBuf;

use thiserror::Error;

use crate::pin::PinSet;

// ============================================================================
// SECTION: Clone Errors
// ============================================================================

/// Errors returned by the installation cloner.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Every variant names the offending path.
#[derive(Debug, Error)]
pub enum CloneError {
    /// Source root does not exist or is not a directory.
    #[error("source is not a directory: {0}")]
    SourceNotADirectory(PathBuf),
    /// Destination exists but is not a directory.
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),
    /// Destination child already exists; the clone must be pristine.
    #[error("already exists: {0}")]
    Collision(PathBuf),
    /// Filesystem operation failed.
    #[error("i/o failure at {path}: {source}")]
    Io {
        /// Path the failed operation touched.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl CloneError {
    /// Wraps an I/O error with the path the operation touched.
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

// ============================================================================
// SECTION: Clone Statistics
// ============================================================================

/// Counters describing the work performed by a clone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CloneStats {
    /// Directories created fresh at the destination.
    pub directories_created: u64,
    /// Pinned regular files copied byte-for-byte.
    pub files_copied: u64,
    /// Symbolic links created for non-pinned regular files.
    pub links_created: u64,
    /// Source symlinks mirrored verbatim.
    pub symlinks_mirrored: u64,
}

// ============================================================================
// SECTION: Cloner
// ============================================================================

/// Clones the install tree at `src` into `dst`.
///
/// Per direct child, recursively: directories are created fresh, regular
/// files whose basename is in `pins` are copied, other regular files become
/// symlinks to the absolute source path, and source symlinks are mirrored
/// verbatim (never followed). `dst` may pre-exist as a directory; any
/// pre-existing child is a fatal collision.
///
/// # Errors
///
/// Returns [`CloneError::SourceNotADirectory`] when `src` is not a
/// directory, [`CloneError::NotADirectory`] when the destination (or a
/// nested destination directory) exists as a non-directory,
/// [`CloneError::Collision`] when a destination child pre-exists, and
/// [`CloneError::Io`] for filesystem failures. Partial destination trees
/// are left in place.
pub fn clone_install(src: &Path, dst: &Path, pins: &PinSet) -> Result<CloneStats, CloneError> {
    let meta = fs::symlink_metadata(src)
        .map_err(|_| CloneError::SourceNotADirectory(src.to_path_buf()))?;
    if !meta.is_dir() {
        return Err(CloneError::SourceNotADirectory(src.to_path_buf()));
    }
    let mut stats = CloneStats::default();
    clone_dir(src, dst, pins, &mut stats)?;
    Ok(stats)
}

/// Mirrors one directory level and recurses into subdirectories.
fn clone_dir(
    src: &Path,
    dst: &Path,
    pins: &PinSet,
    stats: &mut CloneStats,
) -> Result<(), CloneError> {
    match fs::symlink_metadata(dst) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => return Err(CloneError::NotADirectory(dst.to_path_buf())),
        Err(_) => {
            fs::create_dir(dst).map_err(|err| CloneError::io(dst, err))?;
            stats.directories_created += 1;
        }
    }

    let entries = fs::read_dir(src).map_err(|err| CloneError::io(src, err))?;
    for entry in entries {
        let entry = entry.map_err(|err| CloneError::io(src, err))?;
        let child_src = entry.path();
        let child_dst = dst.join(entry.file_name());
        if fs::symlink_metadata(&child_dst).is_ok() {
            return Err(CloneError::Collision(child_dst));
        }

        let file_type = entry.file_type().map_err(|err| CloneError::io(&child_src, err))?;
        if file_type.is_symlink() {
            // Mirror verbatim; following source links risks cycles.
            let target =
                fs::read_link(&child_src).map_err(|err| CloneError::io(&child_src, err))?;
            unix_fs::symlink(&target, &child_dst)
                .map_err(|err| CloneError::io(&child_dst, err))?;
            stats.symlinks_mirrored += 1;
        } else if file_type.is_dir() {
            clone_dir(&child_src, &child_dst, pins, stats)?;
        } else if pins.matches(&child_src) {
            fs::copy(&child_src, &child_dst).map_err(|err| CloneError::io(&child_dst, err))?;
            stats.files_copied += 1;
        } else {
            let target = std::path::absolute(&child_src)
                .map_err(|err| CloneError::io(&child_src, err))?;
            unix_fs::symlink(&target, &child_dst)
                .map_err(|err| CloneError::io(&child_dst, err))?;
            stats.links_created += 1;
        }
    }
    Ok(())
}
