//! Driver injection and removal
//!
//! Both directions are pure text transforms, so the whole pipeline is
//! unit-testable without touching a compiler. The on-disk artifact is only
//! rewritten by the CLI around the external build/run step.
//!
//! Injection anchors on the sentinel line the scaffolder emitted; removal
//! re-locates the driver every time as the last prologue line before the
//! sentinel (offsets are never cached, the file is mutated in place between
//! runs). For C++ the end of the driver is found with a brace-depth scan
//! that skips quoted string content: generated initializer lists contain
//! `{`/`}`, and rendered string literals may too, so a first-match or
//! naive-depth scan would cut the driver short.

use thiserror::Error;

use crate::lang::TargetLang;

/// Structural problems with the solution artifact. Fatal to the current run;
/// the artifact is left untouched (both transforms are pure, the caller only
/// writes on success).
#[derive(Debug, Error, PartialEq)]
pub enum InjectError {
    #[error("sentinel line `{0}` not found in the solution file")]
    SentinelNotFound(String),

    #[error("no generated driver found in the solution file")]
    DriverNotFound,

    #[error("unbalanced braces while scanning for the end of the driver")]
    UnbalancedDelimiter,
}

/// Byte offset of the start of the first line whose trimmed content equals
/// `sentinel`.
fn find_sentinel(source: &str, sentinel: &str) -> Option<usize> {
    let mut offset = 0;
    for line in source.split_inclusive('\n') {
        if line.trim() == sentinel {
            return Some(offset);
        }
        offset += line.len();
    }
    None
}

/// Insert a driver immediately before the sentinel line.
///
/// `driver` must end with a newline (as produced by
/// [`build_driver`](super::harness::build_driver)); one blank line is added
/// between the driver and the sentinel.
pub fn inject_driver(source: &str, driver: &str, lang: TargetLang) -> Result<String, InjectError> {
    let anchor = find_sentinel(source, lang.sentinel())
        .ok_or_else(|| InjectError::SentinelNotFound(lang.sentinel().to_string()))?;

    let mut injected = String::with_capacity(source.len() + driver.len() + 1);
    injected.push_str(&source[..anchor]);
    injected.push_str(driver);
    injected.push('\n');
    injected.push_str(&source[anchor..]);
    Ok(injected)
}

/// Remove the generated driver, returning the artifact as it was before
/// injection. Byte-identical inverse of [`inject_driver`] as long as the
/// driver region itself was not edited.
pub fn remove_driver(source: &str, lang: TargetLang) -> Result<String, InjectError> {
    let anchor = find_sentinel(source, lang.sentinel())
        .ok_or_else(|| InjectError::SentinelNotFound(lang.sentinel().to_string()))?;
    let prologue = lang.driver_prologue();
    let start = find_driver(&source[..anchor], prologue).ok_or(InjectError::DriverNotFound)?;

    let end = match lang {
        TargetLang::Cpp => {
            let open = start + prologue.rfind('{').unwrap_or(prologue.len() - 1);
            let close = matching_brace(source, open)?;
            // Everything between the driver and the sentinel is newlines we
            // inserted; consume them so the round trip is exact.
            let mut end = close + 1;
            while source[end..].starts_with('\n') {
                end += 1;
            }
            end
        }
        // No braces to scan; the driver extends to the sentinel line.
        TargetLang::Python => anchor,
    };

    let mut restored = String::with_capacity(source.len());
    restored.push_str(&source[..start]);
    restored.push_str(&source[end..]);
    Ok(restored)
}

/// Byte offset of the start of the last line in `region` whose content is
/// exactly the driver prologue. Matching whole lines only means prologue
/// text inside a rendered string literal never matches, and taking the last
/// occurrence means an entry-point guard the user wrote above the driver is
/// left alone.
fn find_driver(region: &str, prologue: &str) -> Option<usize> {
    let mut offset = 0;
    let mut found = None;
    for line in region.split_inclusive('\n') {
        if line.trim_end() == prologue {
            found = Some(offset);
        }
        offset += line.len();
    }
    found
}

/// Find the closing brace matching the opening brace at `open`, using a
/// depth counter that ignores braces inside quoted strings. The offset where
/// depth returns to zero is the true end of the function, which may differ
/// from the first `}` encountered when the body contains initializer lists
/// or rendered string literals with braces in them.
fn matching_brace(source: &str, open: usize) -> Result<usize, InjectError> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    for (i, c) in source[open..].char_indices() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(open + i);
                }
            }
            _ => {}
        }
    }
    Err(InjectError::UnbalancedDelimiter)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CPP_SOLUTION: &str = "\
// two_sum
#include <bits/stdc++.h>
using namespace std;

void solution(vector<int> &nums, int target) {
    // write your solution here
}

// end of solution
";

    const CPP_DRIVER: &str = "\
int main() {
    vector<int> nums = {1, 2, 3};
    solution(nums, 9);
    cout << endl;

    return 0;
}
";

    #[test]
    fn test_inject_before_sentinel() {
        let injected = inject_driver(CPP_SOLUTION, CPP_DRIVER, TargetLang::Cpp).unwrap();
        let main_pos = injected.find("int main()").unwrap();
        let sentinel_pos = injected.find("// end of solution").unwrap();
        assert!(main_pos < sentinel_pos);
        // The user's solution function is untouched
        assert!(injected.contains("void solution(vector<int> &nums, int target) {"));
    }

    #[test]
    fn test_round_trip_is_byte_identical() {
        let injected = inject_driver(CPP_SOLUTION, CPP_DRIVER, TargetLang::Cpp).unwrap();
        let restored = remove_driver(&injected, TargetLang::Cpp).unwrap();
        assert_eq!(restored, CPP_SOLUTION);
    }

    #[test]
    fn test_depth_scan_skips_initializer_braces() {
        // The driver body contains nested braces from list literals; a
        // first-match scan would end the driver at the wrong brace.
        let driver = "\
int main() {
    vector<vector<int>> grid = {{1, 2}, {3, 4}};
    solution(grid);
    cout << endl;

    return 0;
}
";
        let injected = inject_driver(CPP_SOLUTION, driver, TargetLang::Cpp).unwrap();
        let restored = remove_driver(&injected, TargetLang::Cpp).unwrap();
        assert_eq!(restored, CPP_SOLUTION);
    }

    #[test]
    fn test_matching_brace_offset() {
        let text = "f() { a = {1, {2}}; }";
        let open = text.find('{').unwrap();
        let close = matching_brace(text, open).unwrap();
        assert_eq!(close, text.len() - 1);
    }

    #[test]
    fn test_missing_sentinel() {
        let err = inject_driver("int x;\n", CPP_DRIVER, TargetLang::Cpp).unwrap_err();
        assert!(matches!(err, InjectError::SentinelNotFound(_)));
    }

    #[test]
    fn test_missing_driver() {
        let err = remove_driver(CPP_SOLUTION, TargetLang::Cpp).unwrap_err();
        assert_eq!(err, InjectError::DriverNotFound);
    }

    #[test]
    fn test_unbalanced_braces() {
        let truncated = "int main() {\n    vector<int> v = {1, 2;\n// end of solution\n";
        let err = remove_driver(truncated, TargetLang::Cpp).unwrap_err();
        assert_eq!(err, InjectError::UnbalancedDelimiter);
    }

    #[test]
    fn test_remove_without_sentinel() {
        let err = remove_driver(CPP_DRIVER, TargetLang::Cpp).unwrap_err();
        assert!(matches!(err, InjectError::SentinelNotFound(_)));
    }

    #[test]
    fn test_open_brace_inside_string_round_trip() {
        let driver = "\
int main() {
    string s = \"a{b\";
    solution(s);
    cout << endl;

    return 0;
}
";
        let injected = inject_driver(CPP_SOLUTION, driver, TargetLang::Cpp).unwrap();
        let restored = remove_driver(&injected, TargetLang::Cpp).unwrap();
        assert_eq!(restored, CPP_SOLUTION);
    }

    #[test]
    fn test_close_brace_inside_string_round_trip() {
        // A stray `}` in a rendered string must not end the depth scan early
        // and leave half the driver behind.
        let driver = "\
int main() {
    string s = \"}\";
    solution(s);
    cout << endl;

    return 0;
}
";
        let injected = inject_driver(CPP_SOLUTION, driver, TargetLang::Cpp).unwrap();
        let restored = remove_driver(&injected, TargetLang::Cpp).unwrap();
        assert_eq!(restored, CPP_SOLUTION);
        assert!(!restored.contains("solution(s);"));
    }

    #[test]
    fn test_user_main_guard_above_driver_survives() {
        // The driver is always the last prologue line before the sentinel;
        // an entry-point guard the user wrote higher up stays untouched.
        let solution = "\
int main() {
    return 0;
}

void solution(int x) {
}

// end of solution
";
        let injected = inject_driver(solution, CPP_DRIVER, TargetLang::Cpp).unwrap();
        let restored = remove_driver(&injected, TargetLang::Cpp).unwrap();
        assert_eq!(restored, solution);
    }

    #[test]
    fn test_user_edits_outside_driver_survive() {
        let injected = inject_driver(CPP_SOLUTION, CPP_DRIVER, TargetLang::Cpp).unwrap();
        let edited = injected.replace(
            "// write your solution here",
            "cout << nums[0] + target << endl;",
        );
        let restored = remove_driver(&edited, TargetLang::Cpp).unwrap();
        assert!(restored.contains("cout << nums[0] + target << endl;"));
        assert!(!restored.contains("int main()"));
    }

    const PY_SOLUTION: &str = "\
# two_sum

def solution(nums, target):
    # write your solution here
    pass

# end of solution
";

    #[test]
    fn test_python_round_trip() {
        let driver = "\
if __name__ == \"__main__\":
    nums = [1, 2, 3]
    print(solution(nums, 9))
    print()
";
        let injected = inject_driver(PY_SOLUTION, driver, TargetLang::Python).unwrap();
        assert!(injected.contains("if __name__"));
        let restored = remove_driver(&injected, TargetLang::Python).unwrap();
        assert_eq!(restored, PY_SOLUTION);
    }
}
