// crates/cds-reloc-core/src/fabricate.rs
// ============================================================================
// Module: Fake-Module Fabricator
// Description: Copies the hello JAR to a modules-named sibling file.
// Purpose: Exercise CDS path recording with an internal-looking basename.
// Dependencies: std, thiserror
// ============================================================================

//! ## Overview
//! The boot class-path append experiments need an entry whose basename
//! collides with an internal-looking name. The fabricator copies the known
//! hello JAR to `hello.modules` in the same directory, overwriting any
//! prior copy, and returns the absolute path of the created file.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use thiserror::Error;

// ============================================================================
// SECTION: Well-Known Names
// ============================================================================

/// Basename of the hello JAR within the classes directory.
pub const HELLO_JAR_NAME: &str = "hello.jar";

/// Basename of the fabricated boot-append artifact.
pub const FABRICATED_MODULES_NAME: &str = "hello.modules";

// ============================================================================
// SECTION: Fabricator Errors
// ============================================================================

/// Errors returned by the fake-module fabricator.
#[derive(Debug, Error)]
pub enum FabricateError {
    /// The hello JAR is missing from the classes directory.
    #[error("missing source jar: {0}")]
    MissingSource(PathBuf),
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

// ============================================================================
// SECTION: Fabricator
// ============================================================================

/// Copies `hello.jar` in `classes_dir` to a sibling `hello.modules`.
///
/// Any prior copy is overwritten, so repeated fabrication is safe and
/// leaves the destination equal to the source.
///
/// # Errors
///
/// Returns [`FabricateError::MissingSource`] when the hello JAR does not
/// exist and [`FabricateError::Io`] when the copy or path resolution fails.
pub fn fabricate_fake_modules(classes_dir: &Path) -> Result<PathBuf, FabricateError> {
    let source = classes_dir.join(HELLO_JAR_NAME);
    if !source.is_file() {
        return Err(FabricateError::MissingSource(source));
    }
    let destination = classes_dir.join(FABRICATED_MODULES_NAME);
    fs::copy(&source, &destination).map_err(|err| FabricateError::Io {
        path: destination.clone(),
        source: err,
    })?;
    std::path::absolute(&destination).map_err(|err| FabricateError::Io {
        path: destination,
        source: err,
    })
}
