// crates/cds-reloc-core/src/output.rs
// ============================================================================
// Module: Execution Records
// Description: Captured child output with negative substring assertions.
// Purpose: Give the driver a uniform surface for judging launched children.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Every launched child yields one [`ExecutionRecord`]: the argument vector
//! actually launched, captured standard output and standard error, and the
//! exit status. Records are consumed immediately by assertions and written
//! out as run artifacts. Assertions run against the combined output so a
//! diagnostic on either stream is caught.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::process::Output;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Output Errors
// ============================================================================

/// Errors raised when a captured output violates an assertion.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Combined output contained a forbidden substring.
    #[error("output contains forbidden substring: {needle}")]
    ForbiddenSubstring {
        /// The substring that must not appear.
        needle: String,
    },
    /// Child exited unsuccessfully where success was required.
    #[error("child exited unsuccessfully (exit code {exit_code})")]
    UnsuccessfulExit {
        /// Exit code of the child, `-1` when terminated by a signal.
        exit_code: i32,
    },
}

// ============================================================================
// SECTION: Execution Record
// ============================================================================

/// Argument vector, captured output, and exit status of one launched child.
///
/// # Invariants
/// - Created per launch, consumed immediately by assertions, then archived.
/// - Output bytes are decoded lossily; assertions are substring checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionRecord {
    /// Argument vector actually launched, program first.
    pub argv: Vec<String>,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Exit code when the child exited normally.
    pub exit_code: Option<i32>,
    /// Whether the child reported success.
    pub success: bool,
}

impl ExecutionRecord {
    /// Builds a record from a completed [`std::process::Output`].
    #[must_use]
    pub fn from_output(argv: Vec<String>, output: &Output) -> Self {
        Self {
            argv,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
            success: output.status.success(),
        }
    }

    /// Returns stdout followed by stderr, the surface assertions run on.
    #[must_use]
    pub fn combined(&self) -> String {
        let mut combined = self.stdout.clone();
        combined.push_str(&self.stderr);
        combined
    }

    /// Asserts that the combined output does not contain `needle`.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::ForbiddenSubstring`] naming the violating
    /// needle when it appears anywhere in the combined output.
    pub fn assert_not_contains(&self, needle: &str) -> Result<(), OutputError> {
        if self.combined().contains(needle) {
            return Err(OutputError::ForbiddenSubstring {
                needle: needle.to_string(),
            });
        }
        Ok(())
    }

    /// Asserts that the child reported success.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::UnsuccessfulExit`] with the exit code (`-1`
    /// when the child was terminated by a signal) on failure.
    pub fn assert_success(&self) -> Result<(), OutputError> {
        if self.success {
            return Ok(());
        }
        Err(OutputError::UnsuccessfulExit {
            exit_code: self.exit_code.unwrap_or(-1),
        })
    }
}
