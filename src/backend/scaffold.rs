//! Solution skeleton generation
//!
//! Emits the initial solution file for a problem: an empty entry-point
//! function whose parameter list is derived from the first test case, plus
//! the sentinel line the injector anchors on.
//!
//! Parameter names and order come from the first case; parameter types are
//! unified across all cases, so a problem whose later cases use decimals
//! still scaffolds with `double`.

use crate::lang::{TargetLang, ENTRY_POINT};

use super::harness::ParsedCase;
use super::types::TargetType;

/// Generate the solution skeleton text for a problem.
///
/// `cases` must all share the first case's variable names and order; extra
/// cases only contribute to type unification.
pub fn scaffold(title: &str, cases: &[ParsedCase], lang: TargetLang) -> String {
    match lang {
        TargetLang::Cpp => scaffold_cpp(title, cases),
        TargetLang::Python => scaffold_python(title, cases),
    }
}

/// Unified parameter types, keyed by position in the first case.
fn unified_params(cases: &[ParsedCase]) -> Vec<(String, TargetType)> {
    let Some(first) = cases.first() else {
        return Vec::new();
    };

    first
        .bindings
        .iter()
        .enumerate()
        .map(|(i, binding)| {
            let ty = cases[1..]
                .iter()
                .filter_map(|c| c.bindings.get(i))
                .fold(binding.ty.clone(), |acc, b| TargetType::unify(&acc, &b.ty));
            (binding.name.clone(), ty)
        })
        .collect()
}

fn scaffold_cpp(title: &str, cases: &[ParsedCase]) -> String {
    let params: Vec<String> = unified_params(cases)
        .into_iter()
        .map(|(name, ty)| format!("{} &{}", ty.cpp_name(), name))
        .collect();

    format!(
        "\
// {title}
// NOTE: print your results for pretests

#include <bits/stdc++.h>
using namespace std;

void {entry}({params}) {{
    // write your solution here
}}

{sentinel}
",
        title = title,
        entry = ENTRY_POINT,
        params = params.join(", "),
        sentinel = TargetLang::Cpp.sentinel(),
    )
}

fn scaffold_python(title: &str, cases: &[ParsedCase]) -> String {
    let params: Vec<String> = cases
        .first()
        .map(|c| c.bindings.iter().map(|b| b.name.clone()).collect())
        .unwrap_or_default();

    format!(
        "\
# {title}
# NOTE: return your results for pretests

def {entry}({params}):
    # write your solution here
    pass

{sentinel}
",
        title = title,
        entry = ENTRY_POINT,
        params = params.join(", "),
        sentinel = TargetLang::Python.sentinel(),
    )
}
