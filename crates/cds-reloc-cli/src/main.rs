// crates/cds-reloc-cli/src/main.rs
// ============================================================================
// Module: CDS Relocation CLI Entry Point
// Description: Command dispatcher for the relocation scenario and cloner.
// Purpose: Run the relocation harness or the clone step from the shell.
// Dependencies: cds-reloc-core, cds-reloc-harness, clap
// ============================================================================

//! ## Overview
//! The `cds-reloc` binary drives the relocation scenario against a
//! configured runtime install, or runs the installation cloner alone.
//! Configuration comes from environment variables with command-line flags
//! taking precedence. Errors map to a single non-zero exit with a
//! diagnostic on standard error.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use cds_reloc_core::CloneStats;
use cds_reloc_core::PinSet;
use cds_reloc_core::clone_install;
use cds_reloc_harness::HarnessConfig;
use cds_reloc_harness::HarnessPaths;
use cds_reloc_harness::RelocationScenario;
use clap::Args;
use clap::Parser;
use clap::Subcommand;

// ============================================================================
// SECTION: CLI Definition
// ============================================================================

/// Relocation harness for CDS archives across a moved runtime install.
#[derive(Debug, Parser)]
#[command(name = "cds-reloc", version, about)]
struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Runs the full six-step relocation scenario.
    Run(RunArgs),
    /// Runs the installation cloner alone.
    Clone(CloneArgs),
}

/// Arguments for the `run` subcommand.
#[derive(Debug, Args)]
struct RunArgs {
    /// Source install root; overrides `CDS_RELOC_JAVA_HOME`/`JAVA_HOME`.
    #[arg(long)]
    java_home: Option<PathBuf>,
    /// Basename of the cloned install under the working directory.
    #[arg(long)]
    dest_name: Option<String>,
    /// Directory holding compiled test classes and the hello JAR.
    #[arg(long)]
    classes_dir: Option<PathBuf>,
    /// Directory where archive files are allocated.
    #[arg(long)]
    archive_dir: Option<PathBuf>,
    /// Root directory for run artifacts.
    #[arg(long)]
    artifact_root: Option<PathBuf>,
}

/// Arguments for the `clone` subcommand.
#[derive(Debug, Args)]
struct CloneArgs {
    /// Source install root to mirror.
    #[arg(long)]
    src: PathBuf,
    /// Destination root for the mirror.
    #[arg(long)]
    dst: PathBuf,
    /// Extra pinned basenames; defaults to the runtime pin set when empty.
    #[arg(long = "pin")]
    pins: Vec<String>,
}

// ============================================================================
// SECTION: CLI Errors
// ============================================================================

/// Terminal CLI error carrying a user-facing message.
#[derive(Debug)]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.message),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => run_scenario(args),
        Command::Clone(args) => run_clone(args),
    }
}

// ============================================================================
// SECTION: Subcommand Handlers
// ============================================================================

/// Runs the full relocation scenario.
fn run_scenario(args: RunArgs) -> CliResult<ExitCode> {
    let mut config = HarnessConfig::load().map_err(|err| CliError::new(err.to_string()))?;
    apply_overrides(&mut config, args);
    let paths = HarnessPaths::resolve(&config).map_err(|err| CliError::new(err.to_string()))?;
    let scenario = RelocationScenario::new(paths).map_err(|err| CliError::new(err.to_string()))?;
    let stats = scenario.run().map_err(|err| CliError::new(err.to_string()))?;
    write_stdout_line(&format!(
        "relocation scenario passed; artifacts at {}",
        scenario.artifacts().root().display()
    ))
    .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line(&clone_stats_line(&stats))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Runs the installation cloner alone.
fn run_clone(args: CloneArgs) -> CliResult<ExitCode> {
    let pins = if args.pins.is_empty() {
        PinSet::runtime_default()
    } else {
        PinSet::from_names(args.pins)
    };
    let stats = clone_install(&args.src, &args.dst, &pins)
        .map_err(|err| CliError::new(err.to_string()))?;
    write_stdout_line(&clone_stats_line(&stats))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Applies command-line overrides onto the environment-backed config.
fn apply_overrides(config: &mut HarnessConfig, args: RunArgs) {
    if args.java_home.is_some() {
        config.java_home = args.java_home;
    }
    if args.dest_name.is_some() {
        config.dest_name = args.dest_name;
    }
    if args.classes_dir.is_some() {
        config.classes_dir = args.classes_dir;
    }
    if args.archive_dir.is_some() {
        config.archive_dir = args.archive_dir;
    }
    if args.artifact_root.is_some() {
        config.artifact_root = args.artifact_root;
    }
}

/// Formats the clone statistics summary line.
fn clone_stats_line(stats: &CloneStats) -> String {
    format!(
        "clone: {} directories, {} copies, {} links, {} mirrored symlinks",
        stats.directories_created, stats.files_copied, stats.links_created,
        stats.symlinks_mirrored
    )
}

/// Formats a stream write failure message.
fn output_error(stream: &str, err: &io::Error) -> String {
    format!("failed to write to {stream}: {err}")
}

/// Writes a diagnostic to standard error and returns a failure code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(&format!("error: {message}"));
    ExitCode::FAILURE
}

/// Writes a line to standard output.
fn write_stdout_line(message: &str) -> io::Result<()> {
    let mut stdout = io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a line to standard error.
fn write_stderr_line(message: &str) -> io::Result<()> {
    let mut stderr = io::stderr();
    writeln!(&mut stderr, "{message}")
}
