// crates/cds-reloc-harness/src/lib.rs
// ============================================================================
// Module: CDS Relocation Harness
// Description: Shared test-library surface for the relocation scenario.
// Purpose: Provide config, archive names, launching, and the test driver.
// Dependencies: cds-reloc-core, serde, serde_jcs, thiserror, zip
// ============================================================================

//! ## Overview
//! The harness crate wraps the core cloner and output model with everything
//! a driven run needs: environment-backed configuration, the process-wide
//! archive-name allocator, the child launcher with bracketed argv logging,
//! the hello JAR builder, canonical-JSON run artifacts, and the six-step
//! relocation scenario itself. The scenario runs strictly sequentially and
//! blocks on each child; nothing here retries or cleans up.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod archive;
pub mod config;
pub mod driver;
pub mod jar;
pub mod launch;
pub mod report;

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod archive_tests;
#[cfg(test)]
mod jar_tests;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use archive::current_archive_name;
pub use archive::start_new_archive_name;
pub use config::ConfigError;
pub use config::HarnessConfig;
pub use config::HarnessEnv;
pub use config::HarnessPaths;
pub use driver::DriverError;
pub use driver::RelocationScenario;
pub use jar::JarError;
pub use jar::get_or_create_hello_jar;
pub use launch::LaunchError;
pub use launch::execute_and_log;
pub use launch::format_argv;
pub use report::RunArtifacts;
