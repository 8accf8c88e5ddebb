// crates/cds-reloc-harness/src/archive_tests.rs
// ============================================================================
// Module: Archive Allocator Unit Tests
// Description: Unit coverage for the process-wide archive-name allocator.
// Purpose: Ensure allocations are fresh and the current name tracks them.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Unit coverage for the archive-name allocator.
//! Invariants:
//! - Each allocation yields a path distinct from the previous one.
//! - The current name always reflects the latest allocation.
//! - Tests serialize access to the process-wide allocator state.

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

use std::path::Path;
use std::sync::Mutex;
use std::sync::OnceLock;

use crate::archive::current_archive_name;
use crate::archive::start_new_archive_name;

fn allocator_lock() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(())).lock().expect("allocator lock poisoned")
}

#[test]
fn allocations_are_fresh_and_tracked() {
    let _lock = allocator_lock();
    let dir = Path::new("/tmp/archives");
    let first = start_new_archive_name(dir);
    assert_eq!(current_archive_name(), Some(first.clone()));

    let second = start_new_archive_name(dir);
    assert_ne!(first, second);
    assert_eq!(current_archive_name(), Some(second));
}

#[test]
fn allocations_land_in_the_requested_directory() {
    let _lock = allocator_lock();
    let dir = Path::new("/tmp/elsewhere");
    let path = start_new_archive_name(dir);
    assert_eq!(path.parent(), Some(dir));
    assert_eq!(path.extension().and_then(|ext| ext.to_str()), Some("jsa"));
}
