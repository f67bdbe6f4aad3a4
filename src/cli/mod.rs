//! CLI module for pretest
//!
//! ## Commands
//!
//! - `new <problem.json>` - Scaffold a problem folder and solution skeleton
//! - `run <file>` - Inject the test driver, build, run, and restore
//!
//! ## Debug flags
//!
//! - `--parse-input TEXT` - Dump the parsed bindings and inferred types
//! - `--emit-driver FILE` - Print the generated driver without touching the file
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use crate::lang::TargetLang;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Scaffold and pretest coding-problem solutions
#[derive(Parser, Debug)]
#[command(name = "pretest")]
#[command(version = VERSION)]
#[command(about = "Scaffold coding-problem solutions and pretest them locally", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Parse a literal-assignment string and dump bindings (debug)
    #[arg(long = "parse-input", value_name = "TEXT")]
    pub parse_input: Option<String>,

    /// Print the generated driver for a solution file (debug)
    #[arg(long = "emit-driver", value_name = "FILE")]
    pub emit_driver: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scaffold a problem folder from a saved problem record
    New {
        /// Problem JSON file (title + test cases), as delivered by a scraper
        #[arg(value_name = "PROBLEM_JSON")]
        problem: PathBuf,
        /// Target language for the solution skeleton
        #[arg(long, value_enum, default_value_t = TargetLang::Cpp)]
        lang: TargetLang,
        /// Directory to create the problem folder in
        #[arg(long = "out-dir", value_name = "DIR", default_value = ".")]
        out_dir: PathBuf,
        /// Override the folder name derived from the problem title
        #[arg(long, value_name = "NAME")]
        title: Option<String>,
    },

    /// Inject the test driver, build, run, print outputs, and restore
    Run {
        /// Solution file (.cpp or .py)
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Test-case JSON file (default: test_cases.json next to the solution)
        #[arg(long, value_name = "FILE")]
        cases: Option<PathBuf>,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    // Handle debug flags first
    if let Some(text) = cli.parse_input {
        return commands::parse_input_debug(&text);
    }
    if let Some(file) = cli.emit_driver {
        return commands::emit_driver(&file);
    }

    match cli.command {
        Some(Command::New {
            problem,
            lang,
            out_dir,
            title,
        }) => commands::new_problem(&problem, lang, &out_dir, title.as_deref()),
        Some(Command::Run { file, cases }) => commands::run_pretests(&file, cases.as_deref()),
        None => Err(CliError::failure(
            "Error: expected a subcommand (try `pretest --help`)",
        )),
    }
}

// ============================================================================
// Tests
// ============================================================================
