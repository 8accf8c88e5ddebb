// system-tests/tests/cloner_properties.rs
// ============================================================================
// Module: Cloner Property Suite
// Description: Property-based coverage for the installation cloner.
// Purpose: Validate copy/link discipline over generated source trees.
// Dependencies: cds-reloc-core, proptest, tempfile
// ============================================================================

//! ## Overview
//! Property-based coverage for the installation cloner: for arbitrary
//! small source trees, every regular file must resolve at the destination
//! with equal content, pinned basenames must be real copies, and all other
//! regular files must be symlinks.

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use cds_reloc_core::PinSet;
use cds_reloc_core::clone_install;
use cds_reloc_core::map_library_name;
use proptest::prelude::Strategy;
use proptest::prelude::proptest;
use proptest::sample::select;
use tempfile::TempDir;

/// Segment vocabulary; pinned basenames appear so collisions are common.
fn segment_pool() -> Vec<&'static str> {
    vec!["bin", "lib", "server", "conf", "java", "release", "modules", "notes", "data"]
}

/// Generates a tree as a map from relative path to file content.
///
/// Candidate paths whose ancestors are already regular files are dropped,
/// so the survivors always describe a realizable tree.
fn tree_strategy() -> impl Strategy<Value = BTreeMap<PathBuf, Vec<u8>>> {
    let segment = select(segment_pool());
    let path = proptest::collection::vec(segment, 1..4).prop_map(PathBuf::from_iter);
    let content = proptest::collection::vec(proptest::prelude::any::<u8>(), 0..64);
    proptest::collection::vec((path, content), 1..12).prop_map(|candidates| {
        let mut files = BTreeMap::new();
        for (path, content) in candidates {
            let conflicts = files.keys().any(|existing: &PathBuf| {
                existing.starts_with(&path) || path.starts_with(existing)
            });
            if !conflicts {
                files.insert(path, content);
            }
        }
        files
    })
}

/// Writes the generated tree under `root`.
fn materialize(root: &std::path::Path, files: &BTreeMap<PathBuf, Vec<u8>>) {
    for (path, content) in files {
        let absolute = root.join(path);
        if let Some(parent) = absolute.parent() {
            fs::create_dir_all(parent).expect("create parent directories");
        }
        fs::write(&absolute, content).expect("write fixture file");
    }
}

proptest! {
    #[test]
    fn cloned_trees_preserve_content_and_discipline(files in tree_strategy()) {
        let temp = TempDir::new().expect("temp dir");
        let src = temp.path().join("rt");
        let dst = temp.path().join("moved_jdk");
        fs::create_dir_all(&src).expect("create source root");
        materialize(&src, &files);

        let pins = PinSet::runtime_default();
        clone_install(&src, &dst, &pins).expect("clone");

        let mapped = map_library_name("jvm");
        for (path, content) in &files {
            let mirrored = dst.join(path);
            let cloned = fs::read(&mirrored).expect("read cloned file");
            assert_eq!(&cloned, content, "content mismatch at {}", path.display());

            let meta = fs::symlink_metadata(&mirrored).expect("stat cloned file");
            let basename = path.file_name().and_then(|name| name.to_str()).unwrap_or("");
            if basename == "java" || basename == mapped {
                assert!(meta.is_file(), "pinned {} must be a copy", path.display());
            } else {
                assert!(
                    meta.file_type().is_symlink(),
                    "non-pinned {} must be a link",
                    path.display()
                );
            }
        }
    }
}
