// crates/cds-reloc-harness/src/archive.rs
// ============================================================================
// Module: Archive Name Allocator
// Description: Process-wide allocator for fresh CDS archive file paths.
// Purpose: Scope one archive file to each dump/execute cycle.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Archive names behave as process-wide state: a run starts a new name once
//! and every subsequent step reads the current one. Names embed the process
//! id and a monotonic counter so concurrent invocations in distinct working
//! directories cannot collide. The allocator is a single-shot facility per
//! run; callers never rely on its internals.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Allocator State
// ============================================================================

/// File-name stem for allocated archives.
const ARCHIVE_STEM: &str = "cds-reloc";

/// File-name extension for allocated archives.
const ARCHIVE_EXTENSION: &str = "jsa";

/// Mutable allocator state behind the process-wide lock.
#[derive(Debug, Default)]
struct ArchiveState {
    /// Monotonic counter advanced by each allocation.
    counter: u64,
    /// Most recently allocated archive path.
    current: Option<PathBuf>,
}

/// Returns the locked process-wide allocator state.
fn state() -> MutexGuard<'static, ArchiveState> {
    static STATE: OnceLock<Mutex<ArchiveState>> = OnceLock::new();
    STATE
        .get_or_init(|| Mutex::new(ArchiveState::default()))
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

// ============================================================================
// SECTION: Allocator API
// ============================================================================

/// Allocates a fresh archive file path under `dir` and makes it current.
#[must_use]
pub fn start_new_archive_name(dir: &Path) -> PathBuf {
    let mut state = state();
    state.counter += 1;
    let name =
        format!("{ARCHIVE_STEM}-{}-{}.{ARCHIVE_EXTENSION}", std::process::id(), state.counter);
    let path = dir.join(name);
    state.current = Some(path.clone());
    path
}

/// Returns the currently allocated archive path, if any.
#[must_use]
pub fn current_archive_name() -> Option<PathBuf> {
    state().current.clone()
}
