//! External collaborator boundaries
//!
//! Trait-based seams for the two external dependencies of the pipeline:
//!
//! - `ProblemSource` - supplies a scraped problem (title + test cases).
//!   The HTTP fetch and HTML scan live behind this trait; the only bundled
//!   implementation reads an already-saved JSON record.
//! - `Toolchain` - builds and runs the injected solution artifact and
//!   captures output. Treated as opaque: no timeout is imposed here, and a
//!   hang in the external process blocks the pipeline (callers wanting
//!   bounded latency must wrap the run call and still restore afterwards).

use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

use crate::lang::TargetLang;
use crate::store::{self, Problem, StoreError};

#[derive(Debug, Error)]
pub enum ToolchainError {
    /// Non-zero status from the external build step, with captured
    /// diagnostics. Fatal to the run; the artifact must still be restored.
    #[error("build failed:\n{stderr}")]
    BuildFailed { stderr: String },

    #[error("failed to invoke external tool: {0}")]
    Io(#[from] std::io::Error),
}

/// Captured output of a successful external build.
#[derive(Debug)]
pub struct BuildOutcome {
    pub stdout: String,
    pub stderr: String,
}

/// Captured output of running the built artifact.
#[derive(Debug)]
pub struct RunOutcome {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
}

// ============================================================================
// Toolchain interface
// ============================================================================

/// Build/run collaborator contract.
///
/// Implementations receive the artifact path only; everything else about the
/// external process is their business.
pub trait Toolchain {
    /// Build the artifact. A diagnostic failure is `BuildFailed` with the
    /// captured stderr, not a success flag.
    fn build(&self, artifact: &Path) -> Result<BuildOutcome, ToolchainError>;

    /// Run the built artifact and capture its output.
    fn run(&self, artifact: &Path) -> Result<RunOutcome, ToolchainError>;
}

/// Pick the toolchain for a target language.
pub fn for_lang(lang: TargetLang) -> Box<dyn Toolchain> {
    match lang {
        TargetLang::Cpp => Box::new(CppToolchain),
        TargetLang::Python => Box::new(PythonToolchain),
    }
}

/// g++ compile then direct execution of the produced binary.
pub struct CppToolchain;

impl CppToolchain {
    /// The executable lands next to the source file, extension stripped.
    fn executable_path(artifact: &Path) -> PathBuf {
        artifact.with_extension("")
    }
}

impl Toolchain for CppToolchain {
    fn build(&self, artifact: &Path) -> Result<BuildOutcome, ToolchainError> {
        let executable = Self::executable_path(artifact);
        let output = Command::new("g++")
            .arg("-std=c++20")
            .arg("-w")
            .arg("-o")
            .arg(&executable)
            .arg(artifact)
            .output()?;

        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        if !output.status.success() {
            return Err(ToolchainError::BuildFailed { stderr });
        }

        Ok(BuildOutcome {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr,
        })
    }

    fn run(&self, artifact: &Path) -> Result<RunOutcome, ToolchainError> {
        let executable = Self::executable_path(artifact);
        let output = Command::new(&executable).output()?;
        // The binary is a per-run artifact; don't leave it next to the
        // solution file.
        let _ = std::fs::remove_file(&executable);
        Ok(RunOutcome {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code(),
        })
    }
}

/// No build step; the interpreter runs the artifact directly.
pub struct PythonToolchain;

impl Toolchain for PythonToolchain {
    fn build(&self, _artifact: &Path) -> Result<BuildOutcome, ToolchainError> {
        Ok(BuildOutcome {
            stdout: String::new(),
            stderr: String::new(),
        })
    }

    fn run(&self, artifact: &Path) -> Result<RunOutcome, ToolchainError> {
        let output = Command::new("python3").arg(artifact).output()?;
        Ok(RunOutcome {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code(),
        })
    }
}

// ============================================================================
// Problem source interface
// ============================================================================

/// Scrape collaborator contract: given a problem reference, deliver its
/// title and ordered test cases.
pub trait ProblemSource {
    fn fetch(&self, reference: &str) -> Result<Problem, StoreError>;
}

/// Reads a problem record previously saved as JSON. The network/scraping
/// implementation is explicitly out of scope for this crate.
pub struct FileProblemSource;

impl ProblemSource for FileProblemSource {
    fn fetch(&self, reference: &str) -> Result<Problem, StoreError> {
        store::load_problem(Path::new(reference))
    }
}
