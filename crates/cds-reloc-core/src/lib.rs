// crates/cds-reloc-core/src/lib.rs
// ============================================================================
// Module: CDS Relocation Core
// Description: Core policy and filesystem logic for the relocation harness.
// Purpose: Provide the cloner, pin-set policy, fabricator, and output model.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Core building blocks for validating CDS archives across a relocated
//! runtime installation. This crate holds the pure pieces: the pin-set
//! predicate that decides which files must be real copies, the installation
//! cloner that mirrors an install tree with symlinks, the fake-module
//! fabricator, and the captured-output model used for substring assertions.
//! Child processes are launched by the harness crate, never from here.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod clone;
pub mod fabricate;
pub mod output;
pub mod pin;

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod output_tests;
#[cfg(test)]
mod pin_tests;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use clone::CloneError;
pub use clone::CloneStats;
pub use clone::clone_install;
pub use fabricate::FABRICATED_MODULES_NAME;
pub use fabricate::FabricateError;
pub use fabricate::HELLO_JAR_NAME;
pub use fabricate::fabricate_fake_modules;
pub use output::ExecutionRecord;
pub use output::OutputError;
pub use pin::PinSet;
pub use pin::map_library_name;
