//! On-disk problem store
//!
//! Test cases are saved next to the solution file as pretty-printed JSON, in
//! the exact form the scraper delivered them (raw input/output strings).
//! The problem folder is always derived from an explicitly passed output
//! directory; there is no fixed on-disk root.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name of the test-case store inside a problem folder.
pub const CASES_FILE: &str = "test_cases.json";

/// One scraped test case: a literal-assignment input string and an opaque
/// expected-output string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    pub input: String,
    pub output: String,
}

/// A scraped problem: title plus ordered test cases. This is the record a
/// `ProblemSource` implementation delivers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    pub title: String,
    pub cases: Vec<TestCase>,
}

impl Problem {
    /// Folder-safe slug for the problem title.
    pub fn slug(&self) -> String {
        let mut slug = String::with_capacity(self.title.len());
        for c in self.title.trim().chars() {
            match c {
                ' ' | '/' | '\\' => slug.push('_'),
                ':' | '?' | '"' | '\'' => {}
                c => slug.push(c.to_ascii_lowercase()),
            }
        }
        slug
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed problem JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Save test cases into `dir/test_cases.json`, returning the path written.
pub fn save_cases(dir: &Path, cases: &[TestCase]) -> Result<PathBuf, StoreError> {
    let path = dir.join(CASES_FILE);
    let json = serde_json::to_string_pretty(cases)?;
    fs::write(&path, json)?;
    Ok(path)
}

/// Load the test cases stored in `dir/test_cases.json`.
pub fn load_cases(dir: &Path) -> Result<Vec<TestCase>, StoreError> {
    load_cases_file(&dir.join(CASES_FILE))
}

/// Load test cases from an explicit file path.
pub fn load_cases_file(path: &Path) -> Result<Vec<TestCase>, StoreError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Load a full problem record (title + cases) from a JSON file.
pub fn load_problem(path: &Path) -> Result<Problem, StoreError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("pretest_store_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = scratch_dir("round_trip");
        let cases = vec![
            TestCase {
                input: "nums = [1,2,3], target = 9".to_string(),
                output: "[0,1]".to_string(),
            },
            TestCase {
                input: "nums = [4,5], target = 3".to_string(),
                output: "[]".to_string(),
            },
        ];

        let path = save_cases(&dir, &cases).unwrap();
        assert!(path.ends_with(CASES_FILE));
        let loaded = load_cases(&dir).unwrap();
        assert_eq!(loaded, cases);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_order_is_preserved() {
        let dir = scratch_dir("order");
        let cases: Vec<TestCase> = (0..5)
            .map(|i| TestCase {
                input: format!("x = {}", i),
                output: i.to_string(),
            })
            .collect();
        save_cases(&dir, &cases).unwrap();
        let loaded = load_cases(&dir).unwrap();
        assert_eq!(loaded, cases);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let dir = scratch_dir("malformed");
        let path = dir.join(CASES_FILE);
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(load_cases(&dir), Err(StoreError::Json(_))));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_slug_normalizes_title() {
        let problem = Problem {
            title: "Two Sum: Part/One".to_string(),
            cases: vec![],
        };
        assert_eq!(problem.slug(), "two_sum_part_one");
    }
}
