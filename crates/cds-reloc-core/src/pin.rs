// crates/cds-reloc-core/src/pin.rs
// ============================================================================
// Module: Pin Set Policy
// Description: Basename predicate for files that must be copied, not linked.
// Purpose: Decide which install files the runtime resolves canonically.
// Dependencies: std
// ============================================================================

//! ## Overview
//! The runtime derives its install root from the canonicalized paths of a
//! small number of on-disk files (the launcher executable and the primary
//! runtime shared library). Those files must be real copies in a relocated
//! install or the runtime would resolve itself back into the source tree.
//! The pin set is a plain value handed to the cloner, so callers can widen
//! or replace it without touching the traversal.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::path::Path;

// ============================================================================
// SECTION: Library Name Mapping
// ============================================================================

/// Prefix applied by the host's shared-library naming convention.
const LIBRARY_PREFIX: &str = "lib";

/// Suffix applied by the host's shared-library naming convention.
#[cfg(target_os = "macos")]
const LIBRARY_SUFFIX: &str = ".dylib";

/// Suffix applied by the host's shared-library naming convention.
#[cfg(not(target_os = "macos"))]
const LIBRARY_SUFFIX: &str = ".so";

/// Basename of the primary launcher executable.
const LAUNCHER_NAME: &str = "java";

/// Stem of the primary runtime shared library.
const RUNTIME_LIBRARY_STEM: &str = "jvm";

/// Maps a library stem to the host's conventional shared-library file name.
///
/// On Linux-family Unix `jvm` maps to `libjvm.so`; on macOS it maps to
/// `libjvm.dylib`. The mapping is literal; no filesystem lookups occur.
#[must_use]
pub fn map_library_name(stem: &str) -> String {
    format!("{LIBRARY_PREFIX}{stem}{LIBRARY_SUFFIX}")
}

// ============================================================================
// SECTION: Pin Set
// ============================================================================

/// Set of basenames excluded from symlink treatment during cloning.
///
/// # Invariants
/// - Matching is by basename, case-sensitive, at any depth.
/// - Directories never match; only regular files are pin-checked.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PinSet {
    /// Pinned basenames.
    names: BTreeSet<String>,
}

impl PinSet {
    /// Creates an empty pin set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a pin set from an iterator of basenames.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the pin set the runtime's self-location logic requires: the
    /// launcher executable and the platform-mapped runtime shared library.
    #[must_use]
    pub fn runtime_default() -> Self {
        Self::from_names([LAUNCHER_NAME.to_string(), map_library_name(RUNTIME_LIBRARY_STEM)])
    }

    /// Adds a basename to the pin set.
    pub fn insert(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    /// Returns true when the basename is pinned.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Returns true when the path's basename is pinned.
    ///
    /// Paths without a final component (for example `/`) never match.
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        path.file_name().and_then(|name| name.to_str()).is_some_and(|name| self.contains(name))
    }
}
