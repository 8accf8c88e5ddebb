// crates/cds-reloc-harness/src/jar_tests.rs
// ============================================================================
// Module: Hello JAR Builder Unit Tests
// Description: Unit coverage for hello JAR creation and reuse.
// Purpose: Ensure the builder is idempotent and emits a readable archive.
// Dependencies: std, tempfile, zip
// ============================================================================

//! ## Overview
//! Unit coverage for the hello JAR builder.
//! Invariants:
//! - First call creates the archive; later calls reuse it byte-for-byte.
//! - The archive holds a manifest and a `Hello.class` entry.

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

use std::fs;

use tempfile::TempDir;
use zip::ZipArchive;

use crate::jar::get_or_create_hello_jar;

#[test]
fn builder_creates_then_reuses_the_jar() {
    let dir = TempDir::new().expect("temp dir");
    let first = get_or_create_hello_jar(dir.path()).expect("create jar");
    assert!(first.is_file());
    let original = fs::read(&first).expect("read jar");

    let second = get_or_create_hello_jar(dir.path()).expect("reuse jar");
    assert_eq!(first, second);
    assert_eq!(fs::read(&second).expect("reread jar"), original);
}

#[test]
fn jar_contains_manifest_and_class_entry() {
    let dir = TempDir::new().expect("temp dir");
    let path = get_or_create_hello_jar(dir.path()).expect("create jar");
    let file = fs::File::open(&path).expect("open jar");
    let mut archive = ZipArchive::new(file).expect("parse jar");
    assert!(archive.by_name("META-INF/MANIFEST.MF").is_ok());
    let class = archive.by_name("Hello.class").expect("class entry");
    assert!(class.size() > 0);
}

#[test]
fn generated_class_carries_the_class_file_magic() {
    let dir = TempDir::new().expect("temp dir");
    let path = get_or_create_hello_jar(dir.path()).expect("create jar");
    let file = fs::File::open(&path).expect("open jar");
    let mut archive = ZipArchive::new(file).expect("parse jar");
    let mut class = archive.by_name("Hello.class").expect("class entry");
    let mut bytes = Vec::new();
    std::io::Read::read_to_end(&mut class, &mut bytes).expect("read class");
    assert_eq!(&bytes[..4], &[0xCA, 0xFE, 0xBA, 0xBE]);
}

#[test]
fn existing_class_file_is_embedded() {
    let dir = TempDir::new().expect("temp dir");
    let marker = b"\xCA\xFE\xBA\xBEprecompiled".to_vec();
    fs::write(dir.path().join("Hello.class"), &marker).expect("write class");
    let path = get_or_create_hello_jar(dir.path()).expect("create jar");
    let file = fs::File::open(&path).expect("open jar");
    let mut archive = ZipArchive::new(file).expect("parse jar");
    let mut class = archive.by_name("Hello.class").expect("class entry");
    let mut bytes = Vec::new();
    std::io::Read::read_to_end(&mut class, &mut bytes).expect("read class");
    assert_eq!(bytes, marker);
}
