// crates/cds-reloc-core/src/pin_tests.rs
// ============================================================================
// Module: Pin Set Unit Tests
// Description: Unit coverage for the pin-set predicate and name mapping.
// Purpose: Ensure pin matching is literal, case-sensitive, basename-only.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Unit coverage for the pin-set predicate and library-name mapping.
//! Invariants:
//! - Matching is by basename, case-sensitive, at any depth.
//! - The mapped library name is literal; no fuzzy suffix matching.

use std::path::Path;

use crate::pin::PinSet;
use crate::pin::map_library_name;

#[test]
fn library_name_uses_host_convention() {
    let mapped = map_library_name("jvm");
    assert!(mapped.starts_with("lib"));
    assert!(mapped == "libjvm.so" || mapped == "libjvm.dylib");
}

#[test]
fn runtime_default_pins_launcher_and_runtime_library() {
    let pins = PinSet::runtime_default();
    assert!(pins.contains("java"));
    assert!(pins.contains(&map_library_name("jvm")));
}

#[test]
fn matching_is_basename_only_at_any_depth() {
    let pins = PinSet::runtime_default();
    assert!(pins.matches(Path::new("/opt/rt/bin/java")));
    assert!(pins.matches(Path::new("unrelated/subtree/java")));
    assert!(!pins.matches(Path::new("/opt/rt/bin/javac")));
}

#[test]
fn matching_is_case_sensitive() {
    let pins = PinSet::from_names(["java"]);
    assert!(!pins.matches(Path::new("/opt/rt/bin/Java")));
    assert!(!pins.matches(Path::new("/opt/rt/bin/JAVA")));
}

#[test]
fn mapped_name_matching_is_literal() {
    let pins = PinSet::from_names(["libjvm.dylib"]);
    assert!(pins.matches(Path::new("/opt/rt/lib/server/libjvm.dylib")));
    assert!(!pins.matches(Path::new("/opt/rt/lib/server/libjvm.so")));
}

#[test]
fn inserted_names_extend_the_set() {
    let mut pins = PinSet::new();
    assert!(!pins.matches(Path::new("bin/keytool")));
    pins.insert("keytool");
    assert!(pins.matches(Path::new("bin/keytool")));
}
