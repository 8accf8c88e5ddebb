// crates/cds-reloc-harness/src/driver.rs
// ============================================================================
// Module: Relocation Test Driver
// Description: Six-step dump/execute sequence across a relocated install.
// Purpose: Orchestrate clone, dumps, and executions with fail-closed checks.
// Dependencies: cds-reloc-core, std
// ============================================================================

//! ## Overview
//! The driver runs the relocation scenario in strict program order: dump an
//! archive from the source install, execute from the source, clone the
//! install, execute from the clone, dump again with a fabricated boot
//! class-path append entry, and execute from the clone with an extended
//! append list. Dump steps must exit successfully; execute steps must not
//! emit `shared class paths mismatch` or `BOOT classpath mismatch`. Any
//! violation aborts the run; steps are never retried and the cloned tree is
//! never cleaned up.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;
use std::path::Path;
use std::path::PathBuf;

use cds_reloc_core::CloneError;
use cds_reloc_core::CloneStats;
use cds_reloc_core::ExecutionRecord;
use cds_reloc_core::FabricateError;
use cds_reloc_core::OutputError;
use cds_reloc_core::PinSet;
use cds_reloc_core::clone_install;
use cds_reloc_core::fabricate_fake_modules;
use thiserror::Error;

use crate::archive::start_new_archive_name;
use crate::config::HarnessPaths;
use crate::jar::JarError;
use crate::jar::get_or_create_hello_jar;
use crate::launch::LaunchError;
use crate::launch::execute_and_log;
use crate::launch::write_stdout_line;
use crate::report::RunArtifacts;
use crate::report::RunSummary;
use crate::report::StepSummary;

// ============================================================================
// SECTION: Scenario Constants
// ============================================================================

/// Host path-list separator used for boot class-path append lists.
const PATH_LIST_SEPARATOR: char = if cfg!(windows) { ';' } else { ':' };

/// Substrings that must not appear in any execute step's output.
const FORBIDDEN_SUBSTRINGS: [&str; 2] =
    ["shared class paths mismatch", "BOOT classpath mismatch"];

/// Relative path of the launcher executable within an install root.
const LAUNCHER_RELATIVE: [&str; 2] = ["bin", "java"];

// ============================================================================
// SECTION: Driver Errors
// ============================================================================

/// Errors raised while driving the relocation scenario.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Step-scoped variants carry the step label for diagnostics.
#[derive(Debug, Error)]
pub enum DriverError {
    /// Cloning the install tree failed.
    #[error("clone failed: {0}")]
    Clone(#[from] CloneError),
    /// Fabricating the fake modules entry failed.
    #[error("fabrication failed: {0}")]
    Fabricate(#[from] FabricateError),
    /// Preparing the hello JAR failed.
    #[error("jar preparation failed: {0}")]
    Jar(#[from] JarError),
    /// A child could not be launched.
    #[error("step {step} could not launch: {source}")]
    Launch {
        /// Step label.
        step: String,
        /// Underlying launch error.
        source: LaunchError,
    },
    /// An expected-success step exited unsuccessfully.
    #[error("step {step} failed: {source}")]
    StepFailed {
        /// Step label.
        step: String,
        /// Underlying output error.
        source: OutputError,
    },
    /// An execute step's output contained a forbidden substring.
    #[error("assertion failed at step {step}: {source}")]
    Assertion {
        /// Step label.
        step: String,
        /// Underlying output error.
        source: OutputError,
    },
    /// A run artifact could not be written.
    #[error("failed to write artifact {path}: {source}")]
    Artifact {
        /// Artifact path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

// ============================================================================
// SECTION: Scenario
// ============================================================================

/// Orchestrates one relocation scenario run.
#[derive(Debug)]
pub struct RelocationScenario {
    /// Resolved paths for the run.
    paths: HarnessPaths,
    /// Artifact sink for step records and the run summary.
    artifacts: RunArtifacts,
}

impl RelocationScenario {
    /// Creates a scenario over resolved paths, creating the artifact root.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Artifact`] when the artifact root cannot be
    /// created.
    pub fn new(paths: HarnessPaths) -> Result<Self, DriverError> {
        let artifacts =
            RunArtifacts::new(paths.artifact_root.clone()).map_err(|err| DriverError::Artifact {
                path: paths.artifact_root.clone(),
                source: err,
            })?;
        Ok(Self {
            paths,
            artifacts,
        })
    }

    /// Returns the resolved paths the scenario runs over.
    #[must_use]
    pub fn paths(&self) -> &HarnessPaths {
        &self.paths
    }

    /// Returns the artifact manager for the run.
    #[must_use]
    pub fn artifacts(&self) -> &RunArtifacts {
        &self.artifacts
    }

    /// Runs the full six-step scenario, returning the clone statistics.
    ///
    /// The run summary is written even when a step fails; the original step
    /// error takes precedence over a summary write failure.
    ///
    /// # Errors
    ///
    /// Returns the first [`DriverError`] encountered; steps are never
    /// retried.
    pub fn run(&self) -> Result<CloneStats, DriverError> {
        let mut steps = Vec::new();
        let result = self.run_steps(&mut steps);
        let summary = RunSummary {
            status: if result.is_ok() { "passed" } else { "failed" }.to_string(),
            steps,
        };
        let summary_result = self.artifacts.write_json("summary.json", &summary);
        let stats = result?;
        summary_result.map_err(|err| DriverError::Artifact {
            path: self.artifacts.root().join("summary.json"),
            source: err,
        })?;
        Ok(stats)
    }

    /// Executes the six steps in strict program order.
    fn run_steps(&self, steps: &mut Vec<StepSummary>) -> Result<CloneStats, DriverError> {
        let archive = start_new_archive_name(&self.paths.archive_dir);
        let archive_opt = format!("-XX:SharedArchiveFile={}", archive.display());
        let src_java = launcher_path(&self.paths.java_home);
        let dst_java = launcher_path(&self.paths.dest_root);

        self.dump(steps, "dump-src", &src_java, &[archive_opt.clone()])?;
        self.execute(steps, "exec-src", &src_java, &archive_opt, None)?;

        let stats =
            clone_install(&self.paths.java_home, &self.paths.dest_root, &PinSet::runtime_default())?;
        steps.push(StepSummary {
            label: "clone".to_string(),
            status: "ok".to_string(),
        });
        let _ = write_stdout_line(&format!(
            "============== Cloned runtime install at {}",
            self.paths.dest_root.display()
        ));

        self.execute(steps, "exec-dst", &dst_java, &archive_opt, None)?;

        let hello_jar = get_or_create_hello_jar(&self.paths.classes_dir)?;
        let fake_modules = fabricate_fake_modules(&self.paths.classes_dir)?;
        let dump_boot_append = format!("-Xbootclasspath/a:{}", fake_modules.display());
        self.dump(
            steps,
            "dump-src-append",
            &src_java,
            &[dump_boot_append.clone(), archive_opt.clone()],
        )?;

        let exec_boot_append =
            format!("{dump_boot_append}{PATH_LIST_SEPARATOR}{}", hello_jar.display());
        self.execute(steps, "exec-dst-append", &dst_java, &archive_opt, Some(exec_boot_append))?;
        Ok(stats)
    }

    /// Runs one archive dump step; a non-zero exit aborts the run.
    fn dump(
        &self,
        steps: &mut Vec<StepSummary>,
        step: &str,
        java: &Path,
        extra: &[String],
    ) -> Result<(), DriverError> {
        let mut argv = vec![java.display().to_string(), "-Xshare:dump".to_string()];
        argv.extend(extra.iter().cloned());
        let record = self.launch(step, &argv)?;
        match record.assert_success() {
            Ok(()) => {
                steps.push(StepSummary {
                    label: step.to_string(),
                    status: "ok".to_string(),
                });
                Ok(())
            }
            Err(err) => {
                steps.push(StepSummary {
                    label: step.to_string(),
                    status: err.to_string(),
                });
                Err(DriverError::StepFailed {
                    step: step.to_string(),
                    source: err,
                })
            }
        }
    }

    /// Runs one execute step and applies the negative substring assertions.
    fn execute(
        &self,
        steps: &mut Vec<StepSummary>,
        step: &str,
        java: &Path,
        archive_opt: &str,
        boot_append: Option<String>,
    ) -> Result<(), DriverError> {
        let mut argv = vec![java.display().to_string(), "-Xshare:auto".to_string()];
        if let Some(append) = boot_append {
            argv.push(append);
        }
        argv.push(archive_opt.to_string());
        argv.push("-Xlog:class+path=info".to_string());
        argv.push("-version".to_string());
        let record = self.launch(step, &argv)?;
        for needle in FORBIDDEN_SUBSTRINGS {
            if let Err(err) = record.assert_not_contains(needle) {
                steps.push(StepSummary {
                    label: step.to_string(),
                    status: err.to_string(),
                });
                return Err(DriverError::Assertion {
                    step: step.to_string(),
                    source: err,
                });
            }
        }
        steps.push(StepSummary {
            label: step.to_string(),
            status: "ok".to_string(),
        });
        Ok(())
    }

    /// Launches a child for a step and archives its execution record.
    fn launch(&self, step: &str, argv: &[String]) -> Result<ExecutionRecord, DriverError> {
        let record = execute_and_log(argv, step).map_err(|err| DriverError::Launch {
            step: step.to_string(),
            source: err,
        })?;
        let name = format!("{step}.json");
        self.artifacts.write_json(&name, &record).map_err(|err| DriverError::Artifact {
            path: self.artifacts.root().join(&name),
            source: err,
        })?;
        Ok(record)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the launcher executable path within an install root.
fn launcher_path(install_root: &Path) -> PathBuf {
    let mut path = install_root.to_path_buf();
    for component in LAUNCHER_RELATIVE {
        path.push(component);
    }
    path
}
