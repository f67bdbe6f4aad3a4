//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.
//!
//! The whole inject -> build -> run -> restore sequence is one critical
//! section over the solution file: every failure path after injection makes
//! a best-effort restore before surfacing the error, so the artifact is
//! never left with the driver inside.

use std::fs;
use std::path::Path;

use crate::backend::{build_driver, inject_driver, remove_driver, scaffold, ParsedCase};
use crate::frontend::{self, diagnostics};
use crate::lang::TargetLang;
use crate::store::{self, TestCase};
use crate::toolchain::{self, ProblemSource};

use super::{CliError, CliResult, ExitCode};

/// Maximum solution file size (10 MB). Larger files are rejected before
/// reading to keep a corrupt artifact from stalling the pipeline.
const MAX_SOURCE_SIZE: u64 = 10 * 1024 * 1024;

// ============================================================================
// Shared helpers
// ============================================================================

/// Read a solution file, rejecting oversized inputs.
fn read_source(path: &Path) -> CliResult<String> {
    let metadata = fs::metadata(path)
        .map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", path.display(), e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Solution file '{}' is too large ({} bytes, max {} bytes)",
            path.display(),
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }

    fs::read_to_string(path)
        .map_err(|e| CliError::failure(format!("Error reading file '{}': {}", path.display(), e)))
}

/// Detect the target language from a solution file's extension.
fn detect_lang(path: &Path) -> CliResult<TargetLang> {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(TargetLang::from_extension)
        .ok_or_else(|| {
            CliError::failure(format!(
                "Unsupported solution file type '{}' (use .cpp or .py)",
                path.display()
            ))
        })
}

/// Validate the output directory to prevent path traversal.
fn validate_out_dir(out_dir: &Path) -> CliResult<()> {
    for component in out_dir.components() {
        if let std::path::Component::ParentDir = component {
            return Err(CliError::failure(format!(
                "Output directory '{}' contains path traversal (..)",
                out_dir.display()
            )));
        }
    }

    if out_dir.is_absolute() {
        tracing::warn!(
            "Using absolute output path: {}. Consider using a relative path.",
            out_dir.display()
        );
    }

    Ok(())
}

/// Parse every test case, naming the case number and variable on failure.
fn parse_cases(cases: &[TestCase]) -> CliResult<Vec<ParsedCase>> {
    cases
        .iter()
        .enumerate()
        .map(|(i, case)| {
            ParsedCase::parse(case).map_err(|e| {
                CliError::failure(format!(
                    "test case {}: {}",
                    i + 1,
                    diagnostics::format_error(&case.input, &e).trim_end()
                ))
            })
        })
        .collect()
}

/// Re-read the artifact and excise the driver by scan, so user edits made
/// elsewhere in the file survive.
fn restore_artifact(path: &Path, lang: TargetLang) -> CliResult<()> {
    let text = read_source(path)?;
    let restored = remove_driver(&text, lang)
        .map_err(|e| CliError::failure(format!("Error restoring '{}': {}", path.display(), e)))?;
    fs::write(path, restored)
        .map_err(|e| CliError::failure(format!("Error writing '{}': {}", path.display(), e)))?;
    tracing::debug!("restored {}", path.display());
    Ok(())
}

/// Best-effort restore on a failure path; appends a note to the original
/// error if the restore itself fails.
fn fail_with_restore(path: &Path, lang: TargetLang, message: String) -> CliError {
    match restore_artifact(path, lang) {
        Ok(()) => CliError::failure(message),
        Err(restore_err) => CliError::failure(format!(
            "{}\nAdditionally, the solution file could not be restored and may still \
             contain the generated driver: {}",
            message, restore_err
        )),
    }
}

// ============================================================================
// Debug commands
// ============================================================================

/// Parse a literal-assignment string and dump bindings with inferred types.
pub fn parse_input_debug(text: &str) -> CliResult<ExitCode> {
    let bindings = frontend::parse_input(text)
        .map_err(|e| CliError::failure(diagnostics::format_error(text, &e).trim_end().to_string()))?;

    if bindings.is_empty() {
        println!("(no assignments found)");
        return Ok(ExitCode::SUCCESS);
    }

    for (name, value) in &bindings {
        let ty = crate::backend::TargetType::of(value);
        println!(
            "{}: {} = {}",
            name,
            ty.cpp_name(),
            crate::backend::render(value, TargetLang::Cpp)
        );
    }
    Ok(ExitCode::SUCCESS)
}

/// Print the driver that `run` would inject, without touching the file.
pub fn emit_driver(file: &Path) -> CliResult<ExitCode> {
    let lang = detect_lang(file)?;
    let cases = load_cases_for(file, None)?;
    let parsed = parse_cases(&cases)?;
    print!("{}", build_driver(&parsed, lang));
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// new: scaffold a problem folder
// ============================================================================

/// Scaffold a problem folder: save the test cases and write the solution
/// skeleton. Refuses to overwrite an existing solution file.
pub fn new_problem(
    problem_path: &Path,
    lang: TargetLang,
    out_dir: &Path,
    title_override: Option<&str>,
) -> CliResult<ExitCode> {
    let problem = toolchain::FileProblemSource
        .fetch(&problem_path.to_string_lossy())
        .map_err(|e| {
            CliError::failure(format!(
                "Error loading problem '{}': {}",
                problem_path.display(),
                e
            ))
        })?;

    if problem.cases.is_empty() {
        return Err(CliError::failure(format!(
            "Problem '{}' has no test cases",
            problem.title
        )));
    }

    validate_out_dir(out_dir)?;

    let folder_name = match title_override {
        Some(name) => name.to_string(),
        None => problem.slug(),
    };
    if folder_name.is_empty() {
        return Err(CliError::failure("Problem title produced an empty folder name"));
    }

    let problem_dir = out_dir.join(&folder_name);
    fs::create_dir_all(&problem_dir).map_err(|e| {
        CliError::failure(format!(
            "Error creating directory '{}': {}",
            problem_dir.display(),
            e
        ))
    })?;

    let solution_path = problem_dir.join(format!("solution.{}", lang.extension()));
    if solution_path.exists() {
        return Err(CliError::failure(format!(
            "Refusing to overwrite existing solution file '{}'",
            solution_path.display()
        )));
    }

    let cases_path = store::save_cases(&problem_dir, &problem.cases)
        .map_err(|e| CliError::failure(format!("Error saving test cases: {}", e)))?;

    let parsed = parse_cases(&problem.cases)?;
    let skeleton = scaffold(&problem.title, &parsed, lang);
    fs::write(&solution_path, skeleton).map_err(|e| {
        CliError::failure(format!(
            "Error writing '{}': {}",
            solution_path.display(),
            e
        ))
    })?;

    println!("Test cases saved in {}", cases_path.display());
    println!("Solution file created: {}", solution_path.display());
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// run: the pretest pipeline
// ============================================================================

/// Load the test cases for a solution file, honoring an explicit override.
fn load_cases_for(file: &Path, override_path: Option<&Path>) -> CliResult<Vec<TestCase>> {
    let result = match override_path {
        Some(path) => store::load_cases_file(path),
        None => {
            let dir = file.parent().unwrap_or(Path::new("."));
            store::load_cases(dir)
        }
    };
    result.map_err(|e| CliError::failure(format!("Error loading test cases: {}", e)))
}

/// Inject the generated driver, build, run, print actual vs. expected
/// output, and restore the solution file.
pub fn run_pretests(file: &Path, cases_override: Option<&Path>) -> CliResult<ExitCode> {
    let lang = detect_lang(file)?;
    let source = read_source(file)?;

    let cases = load_cases_for(file, cases_override)?;
    if cases.is_empty() {
        return Err(CliError::failure("No test cases found"));
    }

    let parsed = parse_cases(&cases)?;
    let driver = build_driver(&parsed, lang);

    let injected = inject_driver(&source, &driver, lang)
        .map_err(|e| CliError::failure(format!("Error preparing '{}': {}", file.display(), e)))?;
    fs::write(file, &injected)
        .map_err(|e| CliError::failure(format!("Error writing '{}': {}", file.display(), e)))?;
    tracing::debug!("injected driver into {}", file.display());

    let tools = toolchain::for_lang(lang);

    if let Err(e) = tools.build(file) {
        return Err(fail_with_restore(file, lang, e.to_string()));
    }

    let outcome = match tools.run(file) {
        Ok(outcome) => outcome,
        Err(e) => {
            return Err(fail_with_restore(
                file,
                lang,
                format!("Error running solution: {}", e),
            ));
        }
    };

    // Restore before reporting, so a failed restore is never masked by a
    // long output dump.
    restore_artifact(file, lang)?;

    println!("Your output:");
    print!("{}", outcome.stdout);
    if !outcome.success {
        if !outcome.stderr.is_empty() {
            eprint!("{}", outcome.stderr);
        }
        tracing::warn!("solution exited with code {:?}", outcome.exit_code);
    }

    println!("Expected output:");
    for case in &cases {
        println!("{}", case.output);
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::env;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("pretest_cmd_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_detect_lang() {
        assert_eq!(detect_lang(Path::new("a/solution.cpp")).unwrap(), TargetLang::Cpp);
        assert_eq!(detect_lang(Path::new("solution.py")).unwrap(), TargetLang::Python);
        assert!(detect_lang(Path::new("solution.rs")).is_err());
        assert!(detect_lang(Path::new("solution")).is_err());
    }

    #[test]
    fn test_validate_out_dir_rejects_traversal() {
        assert!(validate_out_dir(Path::new("../evil")).is_err());
        assert!(validate_out_dir(Path::new("problems/here")).is_ok());
    }

    #[test]
    fn test_parse_cases_names_case_and_variable() {
        let cases = vec![
            TestCase {
                input: "x = 1".to_string(),
                output: "1".to_string(),
            },
            TestCase {
                input: "x = [1, 2".to_string(),
                output: "2".to_string(),
            },
        ];
        let err = parse_cases(&cases).unwrap_err();
        assert!(err.message.contains("test case 2"));
        assert!(err.message.contains("`x`"));
    }

    #[test]
    fn test_new_problem_scaffolds_folder() {
        let dir = scratch_dir("new_problem");
        let problem_path = dir.join("problem.json");
        fs::write(
            &problem_path,
            r#"{"title": "Two Sum", "cases": [{"input": "nums = [2,7,11,15], target = 9", "output": "[0,1]"}]}"#,
        )
        .unwrap();

        new_problem(&problem_path, TargetLang::Cpp, &dir, None).unwrap();

        let solution = dir.join("two_sum").join("solution.cpp");
        let text = fs::read_to_string(&solution).unwrap();
        assert!(text.contains("void solution(vector<int> &nums, int &target) {"));
        assert!(text.contains("// end of solution"));
        assert!(dir.join("two_sum").join(store::CASES_FILE).exists());

        // Second scaffold must refuse to clobber the user's work
        let err = new_problem(&problem_path, TargetLang::Cpp, &dir, None).unwrap_err();
        assert!(err.message.contains("Refusing to overwrite"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_new_problem_rejects_empty_cases() {
        let dir = scratch_dir("empty_cases");
        let problem_path = dir.join("problem.json");
        fs::write(&problem_path, r#"{"title": "Empty", "cases": []}"#).unwrap();

        let err = new_problem(&problem_path, TargetLang::Cpp, &dir, None).unwrap_err();
        assert!(err.message.contains("no test cases"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_run_rejects_missing_cases() {
        let dir = scratch_dir("no_cases");
        let solution = dir.join("solution.cpp");
        fs::write(&solution, "// end of solution\n").unwrap();

        let err = run_pretests(&solution, None).unwrap_err();
        assert!(err.message.contains("Error loading test cases"));

        let _ = fs::remove_dir_all(&dir);
    }
}
