//! Assignment-segment scanner
//!
//! Splits a literal-assignment string (`name1 = value1, name2 = value2, ...`)
//! into ordered `(name, raw value)` segments. Segment boundaries are found by
//! locating the *next* `identifier =` token rather than a fixed delimiter,
//! because values may themselves contain commas (list literals).
//!
//! While looking for assignment heads the scanner tracks bracket depth and
//! quote state, so an `=` inside a list or string never starts a new segment.

use super::diagnostics::Span;

/// One `name = value` fragment, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct RawAssignment {
    pub name: String,
    /// The raw value text, trimmed of surrounding whitespace and the
    /// trailing separator comma.
    pub raw: String,
    /// Byte range of `raw` within the original input.
    pub span: Span,
}

/// Position of an `identifier =` token in the input.
struct AssignmentHead {
    name: String,
    /// Byte offset of the identifier (bounds the previous segment's value).
    name_start: usize,
    /// Byte offset just past the `=`.
    value_start: usize,
}

/// Split an input line into ordered assignment segments.
///
/// Empty segments (e.g. a dangling `x =` before the next assignment) are
/// skipped. Order is preserved; it must match the entry point's parameter
/// order downstream.
pub fn split_assignments(input: &str) -> Vec<RawAssignment> {
    let heads = find_heads(input);
    let mut segments = Vec::with_capacity(heads.len());

    for (idx, head) in heads.iter().enumerate() {
        let region_end = heads
            .get(idx + 1)
            .map(|next| next.name_start)
            .unwrap_or(input.len());
        let region = &input[head.value_start..region_end];

        // Trim whitespace, then the separator comma, then whitespace again.
        let lead = region.len() - region.trim_start().len();
        let mut value = region.trim_start().trim_end();
        if let Some(stripped) = value.strip_suffix(',') {
            value = stripped.trim_end();
        }
        if value.is_empty() {
            continue;
        }

        let start = head.value_start + lead;
        segments.push(RawAssignment {
            name: head.name.clone(),
            raw: value.to_string(),
            span: Span::new(start, start + value.len()),
        });
    }

    segments
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Locate every `identifier =` token at bracket depth zero, outside strings.
fn find_heads(input: &str) -> Vec<AssignmentHead> {
    let chars: Vec<(usize, char)> = input.char_indices().collect();
    let mut heads = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut i = 0;

    while i < chars.len() {
        let (_, c) = chars[i];

        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            i += 1;
            continue;
        }

        match c {
            '"' | '\'' => {
                quote = Some(c);
                i += 1;
            }
            '[' => {
                depth += 1;
                i += 1;
            }
            ']' => {
                depth = depth.saturating_sub(1);
                i += 1;
            }
            c if depth == 0
                && is_ident_start(c)
                && (i == 0 || !is_ident_char(chars[i - 1].1)) =>
            {
                // Scan the identifier, then look for a following `=`
                // (but not `==`).
                let mut j = i + 1;
                while j < chars.len() && is_ident_char(chars[j].1) {
                    j += 1;
                }
                let mut k = j;
                while k < chars.len() && chars[k].1.is_whitespace() {
                    k += 1;
                }
                let is_eq = k < chars.len()
                    && chars[k].1 == '='
                    && chars.get(k + 1).map(|(_, c)| *c != '=').unwrap_or(true);

                if is_eq {
                    let name_start = chars[i].0;
                    let name_end = chars.get(j).map(|(p, _)| *p).unwrap_or(input.len());
                    heads.push(AssignmentHead {
                        name: input[name_start..name_end].to_string(),
                        name_start,
                        value_start: chars[k].0 + 1,
                    });
                    i = k + 1;
                } else {
                    i = j;
                }
            }
            _ => i += 1,
        }
    }

    heads
}
