//! Literal value grammar
//!
//! Decodes a single raw value into a [`Literal`]. The grammar is closed by
//! design: integers, decimals, quoted strings, boolean keywords, and
//! bracketed lists, nothing else. Scraped input never reaches a general
//! expression evaluator; anything outside the grammar is a [`ParseError`].

use std::iter::Peekable;
use std::str::CharIndices;

use super::diagnostics::{ParseError, Span};

/// A semantic value decoded from raw literal text.
///
/// Lists are heterogeneous at this stage; type unification happens in the
/// backend type mapper. A list of lists is just a `List` whose elements are
/// all `List`s.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    List(Vec<Literal>),
}

impl Literal {
    pub fn is_list(&self) -> bool {
        matches!(self, Literal::List(_))
    }
}

/// Decode one raw value (as produced by the segment scanner).
///
/// `base` is the byte offset of `raw` within the original input, so error
/// spans point into the full line.
pub fn parse_value(raw: &str, base: usize) -> Result<Literal, ParseError> {
    let mut scanner = ValueScanner::new(raw, base);
    scanner.skip_ws();
    let value = scanner.scan_value()?;
    scanner.skip_ws();
    if !scanner.is_at_end() {
        return Err(ParseError::new(
            format!("unexpected trailing text after value: `{}`", scanner.rest().trim_end()),
            scanner.span_to_end(),
        ));
    }
    Ok(value)
}

// ============================================================================
// SCANNER
// ============================================================================

struct ValueScanner<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
    base: usize,
    current_pos: usize,
}

impl<'a> ValueScanner<'a> {
    fn new(source: &'a str, base: usize) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            base,
            current_pos: 0,
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn advance(&mut self) -> Option<char> {
        let (i, c) = self.chars.next()?;
        self.current_pos = i + c.len_utf8();
        Some(c)
    }

    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn rest(&mut self) -> &'a str {
        &self.source[self.current_pos..]
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(|c| c.is_whitespace()) {
            self.advance();
        }
    }

    /// Span from a local offset up to the current position, in input bytes.
    fn span_from(&self, start: usize) -> Span {
        Span::new(self.base + start, self.base + self.current_pos)
    }

    fn span_to_end(&self) -> Span {
        Span::new(self.base + self.current_pos, self.base + self.source.len())
    }

    fn scan_value(&mut self) -> Result<Literal, ParseError> {
        match self.peek() {
            Some('[') => self.scan_list(),
            Some(q @ ('"' | '\'')) => self.scan_string(q),
            Some(_) => self.scan_scalar(),
            None => Err(ParseError::new("expected a value", self.span_to_end())),
        }
    }

    /// Scan a bracketed list, recursively. Called with the cursor on `[`.
    fn scan_list(&mut self) -> Result<Literal, ParseError> {
        let start = self.current_pos;
        self.advance(); // consume [
        let mut elements = Vec::new();

        self.skip_ws();
        if self.peek() == Some(']') {
            self.advance();
            return Ok(Literal::List(elements));
        }

        loop {
            self.skip_ws();
            elements.push(self.scan_value()?);
            self.skip_ws();

            match self.advance() {
                Some(',') => continue,
                Some(']') => return Ok(Literal::List(elements)),
                Some(c) => {
                    return Err(ParseError::new(
                        format!("expected `,` or `]` in list, found `{}`", c),
                        self.span_from(self.current_pos - c.len_utf8()),
                    ));
                }
                None => {
                    return Err(ParseError::new("unterminated list", self.span_from(start))
                        .with_hint("missing closing `]`"));
                }
            }
        }
    }

    /// Scan a quoted string. No escape processing: the dequoted text is taken
    /// verbatim (embedded quotes are a known limitation).
    fn scan_string(&mut self, quote: char) -> Result<Literal, ParseError> {
        let start = self.current_pos;
        self.advance(); // consume opening quote
        let mut value = String::new();

        loop {
            match self.advance() {
                Some(c) if c == quote => return Ok(Literal::Str(value)),
                Some(c) => value.push(c),
                None => {
                    return Err(ParseError::new("unterminated string", self.span_from(start))
                        .with_hint(format!("missing closing `{}`", quote)));
                }
            }
        }
    }

    /// Scan a bare scalar token up to the next delimiter and classify it.
    fn scan_scalar(&mut self) -> Result<Literal, ParseError> {
        let start = self.current_pos;
        while self.peek().is_some_and(|c| c != ',' && c != ']') {
            self.advance();
        }
        let token = self.source[start..self.current_pos].trim_end();
        classify_scalar(token, Span::new(self.base + start, self.base + start + token.len()))
    }
}

// ============================================================================
// SCALAR CLASSIFICATION
// ============================================================================

/// Classify a bare token: boolean keyword, integer, or decimal.
fn classify_scalar(token: &str, span: Span) -> Result<Literal, ParseError> {
    match token {
        "" => return Err(ParseError::new("expected a value", span)),
        "true" | "True" => return Ok(Literal::Bool(true)),
        "false" | "False" => return Ok(Literal::Bool(false)),
        _ => {}
    }

    let digits = token.strip_prefix(['+', '-']).unwrap_or(token);

    // All-digit tokens are integers; out-of-range is an error rather than a
    // silent fall-through to float.
    if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
        return token
            .parse::<i64>()
            .map(Literal::Int)
            .map_err(|_| ParseError::new(format!("integer literal out of range: `{}`", token), span));
    }

    // Decimal pattern: digits plus `.` / exponent characters only.
    let decimal_shape = digits.chars().any(|c| c.is_ascii_digit())
        && digits
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if decimal_shape {
        if let Ok(f) = token.parse::<f64>() {
            // An overflowing exponent parses to infinity, which has no
            // literal spelling in the generated source.
            if !f.is_finite() {
                return Err(ParseError::new(
                    format!("decimal literal out of range: `{}`", token),
                    span,
                ));
            }
            return Ok(Literal::Float(f));
        }
    }

    Err(ParseError::new(
        format!("unsupported literal `{}`", token),
        span,
    )
    .with_hint("expected an integer, decimal, quoted string, boolean, or `[...]` list"))
}
