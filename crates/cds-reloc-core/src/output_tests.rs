// crates/cds-reloc-core/src/output_tests.rs
// ============================================================================
// Module: Execution Record Unit Tests
// Description: Unit coverage for captured-output assertions.
// Purpose: Ensure substring and success assertions fail closed.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Unit coverage for captured-output assertions.
//! Invariants:
//! - Substring assertions see stdout and stderr combined.
//! - Success assertions surface the exit code, `-1` for signals.

use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;
use std::process::Output;

use crate::output::ExecutionRecord;
use crate::output::OutputError;

fn record(stdout: &str, stderr: &str, success: bool) -> ExecutionRecord {
    ExecutionRecord {
        argv: vec!["java".to_string(), "-version".to_string()],
        stdout: stdout.to_string(),
        stderr: stderr.to_string(),
        exit_code: if success { Some(0) } else { Some(1) },
        success,
    }
}

#[test]
fn from_output_captures_streams_and_status() {
    let output = Output {
        status: ExitStatus::from_raw(0),
        stdout: b"openjdk version".to_vec(),
        stderr: b"warning".to_vec(),
    };
    let record = ExecutionRecord::from_output(vec!["java".to_string()], &output);
    assert_eq!(record.stdout, "openjdk version");
    assert_eq!(record.stderr, "warning");
    assert!(record.success);
    assert_eq!(record.exit_code, Some(0));
}

#[test]
fn combined_is_stdout_then_stderr() {
    let record = record("first", "second", true);
    assert_eq!(record.combined(), "firstsecond");
}

#[test]
fn assert_not_contains_accepts_clean_output() {
    let record = record("[info][class,path] ok", "", true);
    assert!(record.assert_not_contains("BOOT classpath mismatch").is_ok());
}

#[test]
fn assert_not_contains_rejects_needle_on_stdout() {
    let record = record("shared class paths mismatch", "", true);
    let error = record.assert_not_contains("shared class paths mismatch");
    assert!(matches!(error, Err(OutputError::ForbiddenSubstring { .. })));
}

#[test]
fn assert_not_contains_rejects_needle_on_stderr() {
    let record = record("", "BOOT classpath mismatch", true);
    assert!(record.assert_not_contains("BOOT classpath mismatch").is_err());
}

#[test]
fn assert_success_reports_exit_code() {
    let record = record("", "", false);
    let result = record.assert_success();
    assert!(matches!(
        result,
        Err(OutputError::UnsuccessfulExit {
            exit_code: 1,
        })
    ));
}

#[test]
fn assert_success_accepts_successful_exit() {
    let record = record("", "", true);
    assert!(record.assert_success().is_ok());
}
