//! Frontend: literal-assignment parsing
//!
//! Turns a test case's input text (`name1 = value1, name2 = value2, ...`)
//! into an ordered list of `(name, Literal)` pairs.
//!
//! ## Modules
//!
//! - `scanner` - splits the input into assignment segments
//! - `literal` - the closed value grammar (ints, decimals, strings, bools, lists)
//! - `diagnostics` - parse errors with spans and caret rendering

pub mod diagnostics;
pub mod literal;
pub mod scanner;

pub use diagnostics::{format_error, ParseError, Span};
pub use literal::{parse_value, Literal};
pub use scanner::{split_assignments, RawAssignment};

/// Parse a full literal-assignment string into ordered bindings.
///
/// The first undecodable value aborts the parse with an error naming the
/// offending variable; no partial mapping is returned.
pub fn parse_input(input: &str) -> Result<Vec<(String, Literal)>, ParseError> {
    let mut bindings = Vec::new();
    for segment in split_assignments(input) {
        let value = literal::parse_value(&segment.raw, segment.span.start)
            .map_err(|e| e.for_variable(&segment.name))?;
        bindings.push((segment.name, value));
    }
    Ok(bindings)
}
