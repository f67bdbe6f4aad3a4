//! Literal rendering
//!
//! Serializes a [`Literal`] into target-language source text, recursively for
//! nested containers. Rendering is a structural mirror of the parsed value:
//! it never reorders or deduplicates elements.

use crate::frontend::Literal;
use crate::lang::TargetLang;

/// Render a literal as target-language source text.
pub fn render(literal: &Literal, lang: TargetLang) -> String {
    match literal {
        Literal::Int(i) => i.to_string(),
        Literal::Float(f) => render_float(*f),
        // Strings are wrapped in double quotes with no further escaping;
        // embedded quotes are a known limitation.
        Literal::Str(s) => format!("\"{}\"", s),
        Literal::Bool(b) => match lang {
            TargetLang::Cpp => if *b { "true" } else { "false" }.to_string(),
            TargetLang::Python => if *b { "True" } else { "False" }.to_string(),
        },
        Literal::List(elements) => {
            let inner: Vec<String> = elements.iter().map(|e| render(e, lang)).collect();
            match lang {
                TargetLang::Cpp => format!("{{{}}}", inner.join(", ")),
                TargetLang::Python => format!("[{}]", inner.join(", ")),
            }
        }
    }
}

/// Floats always render with a decimal point (or exponent) so that
/// re-parsing the rendered text yields a float again, not an int.
fn render_float(f: f64) -> String {
    let s = f.to_string();
    if s.contains('.') || s.contains('e') || s.contains('E') {
        s
    } else {
        format!("{}.0", s)
    }
}
