//! Target type mapping
//!
//! Maps a [`Literal`] to a static target type. The mapping is total: it never
//! fails, degrading to [`TargetType::Inferred`] for anything it cannot
//! classify, because rendering can still emit a best-effort literal for an
//! imprecise type.
//!
//! List element types require *full-list* agreement, not first-element
//! agreement: `[1, 2.5]` is a vector of double, not a vector of int.

use crate::frontend::Literal;

/// A static type in the generated target source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetType {
    Int,
    Double,
    Str,
    Bool,
    Vector(Box<TargetType>),
    /// Could not be classified; renders as `auto` in C++.
    Inferred,
}

impl TargetType {
    /// Infer the target type of a literal. Total and pure.
    pub fn of(literal: &Literal) -> TargetType {
        match literal {
            Literal::Int(_) => TargetType::Int,
            Literal::Float(_) => TargetType::Double,
            Literal::Str(_) => TargetType::Str,
            Literal::Bool(_) => TargetType::Bool,
            Literal::List(elements) => TargetType::of_list(elements),
        }
    }

    fn of_list(elements: &[Literal]) -> TargetType {
        let inner = if elements.is_empty() {
            TargetType::Inferred
        } else if elements.iter().all(|e| matches!(e, Literal::Int(_))) {
            TargetType::Int
        } else if elements
            .iter()
            .all(|e| matches!(e, Literal::Int(_) | Literal::Float(_)))
        {
            TargetType::Double
        } else if elements.iter().all(|e| matches!(e, Literal::Bool(_))) {
            TargetType::Bool
        } else if elements.iter().all(|e| matches!(e, Literal::Str(_))) {
            TargetType::Str
        } else if elements.iter().all(|e| e.is_list()) {
            // List of lists: recurse on the first inner list; inner lists are
            // assumed homogeneous across each other.
            TargetType::of(&elements[0])
        } else {
            TargetType::Inferred
        };
        TargetType::Vector(Box::new(inner))
    }

    /// Unify two inferred types across test cases (used for scaffold
    /// signatures). Ints widen to double against floats; element-wise for
    /// vectors; anything else degrades to `Inferred`.
    pub fn unify(a: &TargetType, b: &TargetType) -> TargetType {
        match (a, b) {
            _ if a == b => a.clone(),
            (TargetType::Int, TargetType::Double) | (TargetType::Double, TargetType::Int) => {
                TargetType::Double
            }
            (TargetType::Vector(x), TargetType::Vector(y)) => {
                TargetType::Vector(Box::new(TargetType::unify(x, y)))
            }
            (TargetType::Inferred, other) | (other, TargetType::Inferred) => other.clone(),
            _ => TargetType::Inferred,
        }
    }

    /// The C++ spelling of this type.
    pub fn cpp_name(&self) -> String {
        match self {
            TargetType::Int => "int".to_string(),
            TargetType::Double => "double".to_string(),
            TargetType::Str => "string".to_string(),
            TargetType::Bool => "bool".to_string(),
            TargetType::Vector(inner) => format!("vector<{}>", inner.cpp_name()),
            TargetType::Inferred => "auto".to_string(),
        }
    }
}
