// crates/cds-reloc-harness/src/jar.rs
// ============================================================================
// Module: Hello JAR Builder
// Description: Builds the trivial hello JAR used by boot-append steps.
// Purpose: Provide a stable JAR at a stable path inside the classes dir.
// Dependencies: std, zip
// ============================================================================

//! ## Overview
//! The boot class-path append experiments need a JAR containing a trivial
//! class at a well-known location. The builder creates it on first call and
//! reuses it afterwards. When a compiled `Hello.class` already exists in
//! the classes directory it is embedded; otherwise a minimal, structurally
//! valid class file is generated in-process.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use cds_reloc_core::HELLO_JAR_NAME;
use thiserror::Error;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::FileOptions;

// ============================================================================
// SECTION: JAR Errors
// ============================================================================

/// Errors returned by the hello JAR builder.
#[derive(Debug, Error)]
pub enum JarError {
    /// Filesystem operation failed.
    #[error("i/o failure at {path}: {source}")]
    Io {
        /// Path the failed operation touched.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// Writing the archive failed.
    #[error("failed to write jar {path}: {source}")]
    Zip {
        /// Path of the archive being written.
        path: PathBuf,
        /// Underlying zip error.
        #[source]
        source: zip::result::ZipError,
    },
}

impl JarError {
    /// Wraps an I/O error with the path the operation touched.
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

// ============================================================================
// SECTION: Well-Known Entries
// ============================================================================

/// Manifest entry name inside the JAR.
const MANIFEST_ENTRY: &str = "META-INF/MANIFEST.MF";

/// Manifest contents for the hello JAR.
const MANIFEST_BODY: &[u8] = b"Manifest-Version: 1.0\r\n\r\n";

/// Class entry name inside the JAR.
const HELLO_CLASS_ENTRY: &str = "Hello.class";

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Returns the hello JAR path inside `classes_dir`, creating the JAR on
/// first call.
///
/// The JAR holds a manifest and a `Hello.class` entry. A compiled
/// `Hello.class` found in `classes_dir` is embedded when present; otherwise
/// a minimal generated class file is used. Subsequent calls reuse the
/// existing file.
///
/// # Errors
///
/// Returns [`JarError::Io`] for filesystem failures and [`JarError::Zip`]
/// when archive writing fails.
pub fn get_or_create_hello_jar(classes_dir: &Path) -> Result<PathBuf, JarError> {
    let jar_path = classes_dir.join(HELLO_JAR_NAME);
    if jar_path.is_file() {
        return std::path::absolute(&jar_path).map_err(|err| JarError::io(&jar_path, err));
    }
    fs::create_dir_all(classes_dir).map_err(|err| JarError::io(classes_dir, err))?;

    let class_bytes = match fs::read(classes_dir.join(HELLO_CLASS_ENTRY)) {
        Ok(bytes) => bytes,
        Err(_) => hello_class_bytes(),
    };

    let file = fs::File::create(&jar_path).map_err(|err| JarError::io(&jar_path, err))?;
    let mut writer = ZipWriter::new(file);
    let options = FileOptions::default().compression_method(CompressionMethod::Stored);
    writer
        .start_file(MANIFEST_ENTRY, options)
        .map_err(|err| JarError::Zip {
            path: jar_path.clone(),
            source: err,
        })?;
    writer.write_all(MANIFEST_BODY).map_err(|err| JarError::io(&jar_path, err))?;
    writer
        .start_file(HELLO_CLASS_ENTRY, options)
        .map_err(|err| JarError::Zip {
            path: jar_path.clone(),
            source: err,
        })?;
    writer.write_all(&class_bytes).map_err(|err| JarError::io(&jar_path, err))?;
    writer.finish().map_err(|err| JarError::Zip {
        path: jar_path.clone(),
        source: err,
    })?;
    std::path::absolute(&jar_path).map_err(|err| JarError::io(&jar_path, err))
}

// ============================================================================
// SECTION: Generated Class
// ============================================================================

/// Class-file format version emitted for the generated class.
const CLASS_MAJOR_VERSION: u16 = 52;

/// Access flags for the generated class: `ACC_PUBLIC | ACC_SUPER`.
const CLASS_ACCESS_FLAGS: u16 = 0x0021;

/// Emits a minimal, structurally valid class file for an empty public
/// class `Hello` extending `java/lang/Object`.
fn hello_class_bytes() -> Vec<u8> {
    let mut out = Vec::with_capacity(64);
    out.extend_from_slice(&0xCAFE_BABE_u32.to_be_bytes());
    out.extend_from_slice(&0_u16.to_be_bytes());
    out.extend_from_slice(&CLASS_MAJOR_VERSION.to_be_bytes());
    // Constant pool: #1 Utf8 "Hello", #2 Class #1, #3 Utf8 "java/lang/Object",
    // #4 Class #3. The count field is one past the last index.
    out.extend_from_slice(&5_u16.to_be_bytes());
    push_utf8_constant(&mut out, "Hello");
    push_class_constant(&mut out, 1);
    push_utf8_constant(&mut out, "java/lang/Object");
    push_class_constant(&mut out, 3);
    out.extend_from_slice(&CLASS_ACCESS_FLAGS.to_be_bytes());
    out.extend_from_slice(&2_u16.to_be_bytes());
    out.extend_from_slice(&4_u16.to_be_bytes());
    // No interfaces, fields, methods, or attributes.
    out.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0, 0]);
    out
}

/// Appends a `CONSTANT_Utf8` pool entry.
fn push_utf8_constant(out: &mut Vec<u8>, text: &str) {
    out.push(1);
    let length = u16::try_from(text.len()).unwrap_or(u16::MAX);
    out.extend_from_slice(&length.to_be_bytes());
    out.extend_from_slice(text.as_bytes());
}

/// Appends a `CONSTANT_Class` pool entry referencing a Utf8 index.
fn push_class_constant(out: &mut Vec<u8>, name_index: u16) {
    out.push(7);
    out.extend_from_slice(&name_index.to_be_bytes());
}
