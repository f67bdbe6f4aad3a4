//! Test-driver generation
//!
//! Combines the literal parser, type mapper, and renderer to emit the driver
//! function injected into a solution file: one statement block per test case
//! (typed declarations for the first case, plain re-assignments after that),
//! each followed by a call to the user's entry point and an output separator.

use crate::frontend::{self, Literal, ParseError};
use crate::lang::{TargetLang, ENTRY_POINT};
use crate::store::TestCase;

use super::render::render;
use super::types::TargetType;

// ============================================================================
// Parsed test cases
// ============================================================================

/// One variable binding of a parsed test case, in entry-point parameter order.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub name: String,
    pub value: Literal,
    pub ty: TargetType,
}

/// A fully parsed test case: ordered bindings plus the expected output text.
///
/// The expected output is opaque; it is printed next to the actual output,
/// never compared programmatically.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedCase {
    pub bindings: Vec<Binding>,
    pub expected: String,
}

impl ParsedCase {
    /// Parse a raw test case. Any undecodable value aborts the whole case
    /// with an error naming the variable.
    pub fn parse(case: &TestCase) -> Result<Self, ParseError> {
        let bindings = frontend::parse_input(&case.input)?
            .into_iter()
            .map(|(name, value)| {
                let ty = TargetType::of(&value);
                Binding { name, value, ty }
            })
            .collect();
        Ok(Self {
            bindings,
            expected: case.output.clone(),
        })
    }
}

// ============================================================================
// Driver emitter
// ============================================================================

/// A buffer for building driver source with proper indentation.
#[derive(Debug, Default)]
pub struct DriverEmitter {
    buffer: String,
    indent_level: usize,
}

impl DriverEmitter {
    const INDENT: &'static str = "    ";

    pub fn new() -> Self {
        Self::default()
    }

    /// Write one line at the current indent level.
    pub fn line(&mut self, text: &str) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(Self::INDENT);
        }
        self.buffer.push_str(text);
        self.buffer.push('\n');
    }

    /// Write an empty line (no indentation).
    pub fn blank(&mut self) {
        self.buffer.push('\n');
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    pub fn finish(self) -> String {
        self.buffer
    }
}

// ============================================================================
// Statement blocks and driver assembly
// ============================================================================

/// Emit the statement block for one test case.
///
/// `index` is 1-based and only used for the case label comment. The first
/// case declares variables (C++); later cases re-assign them, relying on the
/// first case's declarations staying in scope. Variable names and order must
/// be identical across all cases sharing one driver; that is the caller's
/// contract, not validated here.
fn emit_case(out: &mut DriverEmitter, case: &ParsedCase, index: usize, first: bool, lang: TargetLang) {
    out.line(&format!("{} test case {}", lang.comment_leader(), index));

    for binding in &case.bindings {
        let value = render(&binding.value, lang);
        let stmt = match lang {
            TargetLang::Cpp if first => {
                format!("{} {} = {};", binding.ty.cpp_name(), binding.name, value)
            }
            TargetLang::Cpp => format!("{} = {};", binding.name, value),
            // Python has no declaration syntax; every case assigns.
            TargetLang::Python => format!("{} = {}", binding.name, value),
        };
        out.line(&stmt);
    }

    let mut args = String::new();
    for (i, binding) in case.bindings.iter().enumerate() {
        if i > 0 {
            args.push_str(", ");
        }
        args.push_str(&binding.name);
    }

    match lang {
        TargetLang::Cpp => {
            out.line(&format!("{}({});", ENTRY_POINT, args));
            out.line("cout << endl;");
        }
        TargetLang::Python => {
            out.line(&format!("print({}({}))", ENTRY_POINT, args));
            out.line("print()");
        }
    }
}

/// Assemble the complete driver function text for a sequence of test cases.
///
/// The result ends with a newline and is ready to hand to the injector.
pub fn build_driver(cases: &[ParsedCase], lang: TargetLang) -> String {
    let mut out = DriverEmitter::new();
    out.line(lang.driver_prologue());
    out.indent();

    for (i, case) in cases.iter().enumerate() {
        if i > 0 {
            out.blank();
        }
        emit_case(&mut out, case, i + 1, i == 0, lang);
    }

    if lang == TargetLang::Cpp {
        out.blank();
        out.line("return 0;");
        out.dedent();
        out.line("}");
    }

    out.finish()
}
