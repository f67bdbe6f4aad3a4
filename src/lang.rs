//! Target language definitions
//!
//! Everything language-specific that the rest of the pipeline keys on lives
//! here: file extensions, comment syntax, the sentinel line the injector
//! anchors on, and the driver prologue the remover re-locates.

use std::fmt;

use clap::ValueEnum;

/// Name of the function every solution skeleton defines and every generated
/// driver calls.
pub const ENTRY_POINT: &str = "solution";

/// A supported solution target language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TargetLang {
    /// C++ (compiled with g++, C++20)
    Cpp,
    /// Python 3
    Python,
}

impl TargetLang {
    /// Map a solution file extension to its language.
    pub fn from_extension(ext: &str) -> Option<TargetLang> {
        match ext {
            "cpp" | "cc" | "cxx" => Some(TargetLang::Cpp),
            "py" => Some(TargetLang::Python),
            _ => None,
        }
    }

    /// Canonical extension for generated solution files.
    pub fn extension(&self) -> &'static str {
        match self {
            TargetLang::Cpp => "cpp",
            TargetLang::Python => "py",
        }
    }

    /// Line-comment leader.
    pub fn comment_leader(&self) -> &'static str {
        match self {
            TargetLang::Cpp => "//",
            TargetLang::Python => "#",
        }
    }

    /// The sentinel line marking the end of the user's solution. The injector
    /// inserts the driver immediately before this line; matching is on the
    /// trimmed line content.
    pub fn sentinel(&self) -> &'static str {
        match self {
            TargetLang::Cpp => "// end of solution",
            TargetLang::Python => "# end of solution",
        }
    }

    /// First line of every generated driver; the remover re-locates the
    /// driver by this text.
    pub fn driver_prologue(&self) -> &'static str {
        match self {
            TargetLang::Cpp => "int main() {",
            TargetLang::Python => "if __name__ == \"__main__\":",
        }
    }
}

impl fmt::Display for TargetLang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetLang::Cpp => write!(f, "cpp"),
            TargetLang::Python => write!(f, "python"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(TargetLang::from_extension("cpp"), Some(TargetLang::Cpp));
        assert_eq!(TargetLang::from_extension("cc"), Some(TargetLang::Cpp));
        assert_eq!(TargetLang::from_extension("py"), Some(TargetLang::Python));
        assert_eq!(TargetLang::from_extension("rs"), None);
    }

    #[test]
    fn test_sentinel_uses_comment_leader() {
        for lang in [TargetLang::Cpp, TargetLang::Python] {
            assert!(lang.sentinel().starts_with(lang.comment_leader()));
        }
    }

    #[test]
    fn test_display_matches_cli_values() {
        assert_eq!(TargetLang::Cpp.to_string(), "cpp");
        assert_eq!(TargetLang::Python.to_string(), "python");
    }
}
