// crates/cds-reloc-harness/src/launch.rs
// ============================================================================
// Module: Child Launcher
// Description: Launches children with logged argv and captured output.
// Purpose: Provide the single spawn path every harness step goes through.
// Dependencies: cds-reloc-core, std
// ============================================================================

//! ## Overview
//! Every child launch flows through [`execute_and_log`]: the argument
//! vector is echoed to standard output bracketed by `[` and `]`, the child
//! is spawned with the vector verbatim, and its captured output comes back
//! as an [`ExecutionRecord`]. Exit status is recorded, never interpreted;
//! the caller decides what a non-zero exit means for its step.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;
use std::io::Write;
use std::process::Command;

use cds_reloc_core::ExecutionRecord;
use thiserror::Error;

// ============================================================================
// SECTION: Launch Errors
// ============================================================================

/// Errors returned by the child launcher.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The argument vector was empty.
    #[error("cannot launch with an empty argument vector")]
    EmptyArgv,
    /// Writing the launch log line failed.
    #[error("failed to log launch for {label}: {source}")]
    Log {
        /// Step label the launch belongs to.
        label: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// Spawning or waiting on the child failed.
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        /// Program that could not be launched.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

// ============================================================================
// SECTION: Launcher
// ============================================================================

/// Formats an argument vector the way the launcher logs it.
///
/// The vector is bracketed by `[` and `]` with each argument preceded by a
/// single space: `[ prog arg1 arg2 ]`.
#[must_use]
pub fn format_argv(argv: &[String]) -> String {
    let mut line = String::from("[");
    for arg in argv {
        line.push(' ');
        line.push_str(arg);
    }
    line.push_str(" ]");
    line
}

/// Launches `argv` after echoing it to standard output, capturing the
/// child's output into an [`ExecutionRecord`].
///
/// # Errors
///
/// Returns [`LaunchError::EmptyArgv`] for an empty vector,
/// [`LaunchError::Log`] when the echo cannot be written, and
/// [`LaunchError::Spawn`] when the child cannot be launched or waited on.
pub fn execute_and_log(argv: &[String], label: &str) -> Result<ExecutionRecord, LaunchError> {
    let (program, args) = argv.split_first().ok_or(LaunchError::EmptyArgv)?;
    write_stdout_line(&format_argv(argv)).map_err(|err| LaunchError::Log {
        label: label.to_string(),
        source: err,
    })?;
    let output = Command::new(program).args(args).output().map_err(|err| LaunchError::Spawn {
        program: program.clone(),
        source: err,
    })?;
    Ok(ExecutionRecord::from_output(argv.to_vec(), &output))
}

// ============================================================================
// SECTION: Writer Helpers
// ============================================================================

/// Writes a line to standard output.
pub(crate) fn write_stdout_line(message: &str) -> io::Result<()> {
    let mut stdout = io::stdout();
    writeln!(&mut stdout, "{message}")
}
