// crates/cds-reloc-harness/src/config/env.rs
// ============================================================================
// Module: Harness Environment
// Description: Environment-backed configuration for relocation runs.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: std, thiserror
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid
//! silent misconfiguration. Invalid UTF-8 and empty values fail closed.
//! `HarnessPaths::resolve` turns the optional settings into the absolute
//! paths a run needs, defaulting relative to the working directory.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;
use std::path::PathBuf;

use thiserror::Error;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys for harness configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarnessEnv {
    /// Source install root (the `java.home` equivalent).
    JavaHome,
    /// Basename of the cloned install under the working directory.
    DestName,
    /// Directory holding compiled test classes and the hello JAR.
    ClassesDir,
    /// Directory where archive files are allocated.
    ArchiveDir,
    /// Root directory for run artifacts.
    ArtifactRoot,
}

impl HarnessEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::JavaHome => "CDS_RELOC_JAVA_HOME",
            Self::DestName => "CDS_RELOC_DEST_NAME",
            Self::ClassesDir => "CDS_RELOC_CLASSES_DIR",
            Self::ArchiveDir => "CDS_RELOC_ARCHIVE_DIR",
            Self::ArtifactRoot => "CDS_RELOC_ARTIFACT_ROOT",
        }
    }
}

/// Fallback environment variable consulted when `CDS_RELOC_JAVA_HOME` is
/// unset.
const JAVA_HOME_FALLBACK: &str = "JAVA_HOME";

/// Default basename for the cloned install tree.
const DEFAULT_DEST_NAME: &str = "moved_jdk";

/// Default subdirectory for run artifacts under the working directory.
const DEFAULT_ARTIFACT_SUBDIR: &str = "target/cds-reloc";

// ============================================================================
// SECTION: Config Errors
// ============================================================================

/// Errors raised while loading or resolving harness configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment value is not valid UTF-8.
    #[error("{name} must be valid UTF-8")]
    NotUtf8 {
        /// Offending environment variable name.
        name: &'static str,
    },
    /// Environment value is set but empty or whitespace.
    #[error("{name} must not be empty")]
    Empty {
        /// Offending environment variable name.
        name: &'static str,
    },
    /// No source install root is configured.
    #[error("no source install root configured; set CDS_RELOC_JAVA_HOME or JAVA_HOME")]
    MissingJavaHome,
    /// The working directory could not be determined.
    #[error("cannot determine working directory: {0}")]
    WorkingDirectory(#[source] io::Error),
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Typed harness configuration derived from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HarnessConfig {
    /// Source install root override.
    pub java_home: Option<PathBuf>,
    /// Basename override for the cloned install tree.
    pub dest_name: Option<String>,
    /// Classes directory override.
    pub classes_dir: Option<PathBuf>,
    /// Archive directory override.
    pub archive_dir: Option<PathBuf>,
    /// Run-artifact root override.
    pub artifact_root: Option<PathBuf>,
}

impl HarnessConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotUtf8`] or [`ConfigError::Empty`] when an
    /// environment value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let java_home = match read_env_nonempty(HarnessEnv::JavaHome.as_str())? {
            Some(value) => Some(PathBuf::from(value)),
            None => read_java_home_fallback()?,
        };
        let dest_name = read_env_nonempty(HarnessEnv::DestName.as_str())?;
        let classes_dir = read_env_nonempty(HarnessEnv::ClassesDir.as_str())?.map(PathBuf::from);
        let archive_dir = read_env_nonempty(HarnessEnv::ArchiveDir.as_str())?.map(PathBuf::from);
        let artifact_root =
            read_env_nonempty(HarnessEnv::ArtifactRoot.as_str())?.map(PathBuf::from);
        Ok(Self {
            java_home,
            dest_name,
            classes_dir,
            archive_dir,
            artifact_root,
        })
    }
}

/// Absolute paths resolved for one harness run.
///
/// # Invariants
/// - `dest_root` is always a direct child of the working directory unless
///   a caller constructs the value explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessPaths {
    /// Source install root (read-only for the run).
    pub java_home: PathBuf,
    /// Destination root for the cloned install tree.
    pub dest_root: PathBuf,
    /// Directory holding compiled test classes and the hello JAR.
    pub classes_dir: PathBuf,
    /// Directory where archive files are allocated.
    pub archive_dir: PathBuf,
    /// Root directory for run artifacts.
    pub artifact_root: PathBuf,
}

impl HarnessPaths {
    /// Resolves configuration into the absolute paths for a run.
    ///
    /// Defaults: the destination root is `<cwd>/moved_jdk`, the classes and
    /// archive directories are the working directory, and run artifacts go
    /// under `target/cds-reloc/run_<pid>`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingJavaHome`] when no source install root
    /// is configured and [`ConfigError::WorkingDirectory`] when the working
    /// directory cannot be read.
    pub fn resolve(config: &HarnessConfig) -> Result<Self, ConfigError> {
        let java_home = config.java_home.clone().ok_or(ConfigError::MissingJavaHome)?;
        let cwd = std::env::current_dir().map_err(ConfigError::WorkingDirectory)?;
        let dest_name = config.dest_name.clone().unwrap_or_else(|| DEFAULT_DEST_NAME.to_string());
        let artifact_root = config.artifact_root.clone().unwrap_or_else(|| {
            cwd.join(DEFAULT_ARTIFACT_SUBDIR).join(format!("run_{}", std::process::id()))
        });
        Ok(Self {
            java_home,
            dest_root: cwd.join(dest_name),
            classes_dir: config.classes_dir.clone().unwrap_or_else(|| cwd.clone()),
            archive_dir: config.archive_dir.clone().unwrap_or(cwd),
            artifact_root,
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns [`ConfigError::NotUtf8`] when the value contains invalid UTF-8.
pub fn read_env_strict(name: &'static str) -> Result<Option<String>, ConfigError> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string().map(Some).map_err(|_| ConfigError::NotUtf8 {
            name,
        })
    })
}

/// Reads an environment variable and rejects empty values.
fn read_env_nonempty(name: &'static str) -> Result<Option<String>, ConfigError> {
    match read_env_strict(name)? {
        Some(value) if value.trim().is_empty() => Err(ConfigError::Empty {
            name,
        }),
        Some(value) => Ok(Some(value)),
        None => Ok(None),
    }
}

/// Reads the conventional `JAVA_HOME` fallback.
fn read_java_home_fallback() -> Result<Option<PathBuf>, ConfigError> {
    Ok(read_env_nonempty(JAVA_HOME_FALLBACK)?.map(PathBuf::from))
}
