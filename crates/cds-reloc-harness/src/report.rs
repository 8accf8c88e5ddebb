// crates/cds-reloc-harness/src/report.rs
// ============================================================================
// Module: Run Artifacts
// Description: Canonical-JSON artifact writing for harness runs.
// Purpose: Persist per-step records and the run summary deterministically.
// Dependencies: serde, serde_jcs
// ============================================================================

//! ## Overview
//! Each harness run owns an artifact root. Step records and the final run
//! summary are serialized as canonical JSON so reruns over identical inputs
//! produce byte-identical artifacts.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use serde::Serialize;

// ============================================================================
// SECTION: Artifact Manager
// ============================================================================

/// Artifact manager for a single harness run.
#[derive(Debug, Clone)]
pub struct RunArtifacts {
    /// Root directory all artifacts land under.
    root: PathBuf,
}

impl RunArtifacts {
    /// Creates the artifact root for a run.
    ///
    /// # Errors
    ///
    /// Returns an error when the root directory cannot be created.
    pub fn new(root: PathBuf) -> io::Result<Self> {
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
        })
    }

    /// Returns the root directory for the run artifacts.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes a JSON artifact using canonical JCS serialization.
    ///
    /// # Errors
    ///
    /// Returns an error when serialization or the write fails.
    pub fn write_json<T: Serialize>(&self, name: &str, value: &T) -> io::Result<PathBuf> {
        let path = self.root.join(name);
        let bytes = serde_jcs::to_vec(value).map_err(|err| io::Error::other(err.to_string()))?;
        fs::write(&path, bytes)?;
        Ok(path)
    }

    /// Writes a text artifact with UTF-8 encoding.
    ///
    /// # Errors
    ///
    /// Returns an error when the write fails.
    pub fn write_text(&self, name: &str, value: &str) -> io::Result<PathBuf> {
        let path = self.root.join(name);
        fs::write(&path, value.as_bytes())?;
        Ok(path)
    }
}

// ============================================================================
// SECTION: Run Summary
// ============================================================================

/// Outcome of one driver step, as archived in the run summary.
#[derive(Debug, Clone, Serialize)]
pub struct StepSummary {
    /// Step label.
    pub label: String,
    /// Step status: `ok` or a diagnostic.
    pub status: String,
}

/// Summary of a complete harness run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Overall status: `passed` or `failed`.
    pub status: String,
    /// Per-step outcomes in execution order.
    pub steps: Vec<StepSummary>,
}
