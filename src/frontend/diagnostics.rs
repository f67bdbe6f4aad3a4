//! Diagnostics for literal-assignment parsing
//!
//! Parse errors carry a byte span into the input text and the name of the
//! offending variable so the CLI can point at the exact value that failed.

/// A byte range into the input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// A parse error for one literal-assignment string.
///
/// Parsing is all-or-nothing per test case: the first undecodable value
/// aborts the whole parse and no partial mapping is returned.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
    /// Variable whose value failed to decode, once known.
    pub variable: Option<String>,
    pub hints: Vec<String>,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            variable: None,
            hints: Vec::new(),
        }
    }

    /// Attach the name of the variable whose value was being decoded.
    pub fn for_variable(mut self, name: &str) -> Self {
        if self.variable.is_none() {
            self.variable = Some(name.to_string());
        }
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.variable {
            Some(name) => write!(f, "invalid value for variable `{}`: {}", name, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ParseError {}

/// Render an error with caret context against the input text.
pub fn format_error(input: &str, error: &ParseError) -> String {
    let (line_num, col_num, line_text) = get_line_info(input, error.span.start);

    let mut out = String::new();
    out.push_str(&format!("error: {}\n", error));
    out.push_str(&format!("  --> input:{}:{}\n", line_num, col_num));
    out.push_str(&format!("   | {}\n", line_text));

    // Caret run under the offending span, clamped to the line end
    let span_len = error.span.end.saturating_sub(error.span.start).max(1);
    let remaining = line_text.len().saturating_sub(col_num - 1).max(1);
    let width = span_len.min(remaining);
    out.push_str(&format!(
        "   | {}{}\n",
        " ".repeat(col_num - 1),
        "^".repeat(width)
    ));

    for hint in &error.hints {
        out.push_str(&format!("   = hint: {}\n", hint));
    }
    out
}

/// Get 1-based line number, column, and line text for a byte position.
fn get_line_info(source: &str, pos: usize) -> (usize, usize, &str) {
    let pos = pos.min(source.len());
    let mut line_start = 0;
    let mut line_num = 1;

    for (i, c) in source.char_indices() {
        if i >= pos {
            break;
        }
        if c == '\n' {
            line_start = i + 1;
            line_num += 1;
        }
    }

    let line_end = source[line_start..]
        .find('\n')
        .map(|o| line_start + o)
        .unwrap_or(source.len());

    (line_num, pos - line_start + 1, &source[line_start..line_end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_names_variable() {
        let err = ParseError::new("unterminated list", Span::new(4, 10)).for_variable("x");
        assert_eq!(
            err.to_string(),
            "invalid value for variable `x`: unterminated list"
        );
    }

    #[test]
    fn test_for_variable_keeps_first_name() {
        let err = ParseError::new("bad", Span::new(0, 1))
            .for_variable("inner")
            .for_variable("outer");
        assert_eq!(err.variable.as_deref(), Some("inner"));
    }

    #[test]
    fn test_format_error_points_at_span() {
        let input = "x = [1, 2";
        let err = ParseError::new("unterminated list", Span::new(4, 9)).for_variable("x");
        let rendered = format_error(input, &err);
        assert!(rendered.contains("input:1:5"));
        assert!(rendered.contains("x = [1, 2"));
        assert!(rendered.contains("^^^^^"));
    }

    #[test]
    fn test_line_info_second_line() {
        let (line, col, text) = get_line_info("a = 1\nb = 2", 8);
        assert_eq!(line, 2);
        assert_eq!(col, 3);
        assert_eq!(text, "b = 2");
    }
}
