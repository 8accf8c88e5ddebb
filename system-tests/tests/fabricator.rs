// system-tests/tests/fabricator.rs
// ============================================================================
// Module: Fabricator Suite
// Description: End-to-end coverage for the fake-module fabricator.
// Purpose: Validate equivalence, idempotence, and failure modes.
// Dependencies: cds-reloc-core, cds-reloc-harness, tempfile
// ============================================================================

//! ## Overview
//! End-to-end coverage for the fake-module fabricator.
//! Invariants:
//! - `hello.modules` is byte-identical to `hello.jar`.
//! - Fabrication overwrites stale copies and never fails on rerun.

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

use std::fs;

use cds_reloc_core::FabricateError;
use cds_reloc_core::fabricate_fake_modules;
use cds_reloc_harness::get_or_create_hello_jar;
use tempfile::TempDir;

#[test]
fn fabricated_modules_equal_the_hello_jar() {
    let temp = TempDir::new().expect("temp dir");
    let jar = get_or_create_hello_jar(temp.path()).expect("create jar");

    let modules = fabricate_fake_modules(temp.path()).expect("fabricate");
    assert!(modules.is_absolute());
    assert_eq!(modules.file_name().and_then(|name| name.to_str()), Some("hello.modules"));
    assert_eq!(fs::read(&modules).expect("read modules"), fs::read(&jar).expect("read jar"));
}

#[test]
fn fabrication_is_idempotent() {
    let temp = TempDir::new().expect("temp dir");
    let jar = get_or_create_hello_jar(temp.path()).expect("create jar");

    let first = fabricate_fake_modules(temp.path()).expect("first fabrication");
    let second = fabricate_fake_modules(temp.path()).expect("second fabrication");
    assert_eq!(first, second);
    assert_eq!(fs::read(&second).expect("read modules"), fs::read(&jar).expect("read jar"));
}

#[test]
fn fabrication_overwrites_a_stale_copy() {
    let temp = TempDir::new().expect("temp dir");
    let jar = get_or_create_hello_jar(temp.path()).expect("create jar");
    fs::write(temp.path().join("hello.modules"), b"stale bytes").expect("write stale copy");

    let modules = fabricate_fake_modules(temp.path()).expect("fabricate");
    assert_eq!(fs::read(&modules).expect("read modules"), fs::read(&jar).expect("read jar"));
}

#[test]
fn fabrication_without_the_jar_fails_closed() {
    let temp = TempDir::new().expect("temp dir");
    let result = fabricate_fake_modules(temp.path());
    assert!(matches!(result, Err(FabricateError::MissingSource(_))));
}
