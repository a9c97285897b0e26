//! # Generic Constraint Solving
//!
//! This module implements the one genuinely subtle algorithm of the checker:
//! extracting generic bindings when a formal parameter type meets an actual
//! argument type, and substituting them into a result type.
//!
//! ## Solving
//!
//! [`type_constraints`] yields `None` when the types do not fit, or a map
//! from generic name to concrete type. The rules, checked in order:
//!
//! 1. A generic formal binds to anything: `a` vs `Int` gives `{a := Int}`.
//!    Binding is one-sided - generics in the *actual* are treated
//!    structurally.
//! 2. `Applied(TL f, t)` vs `Applied(TL g, Generic x)` gives `{x := t}`
//!    when `f == g`. This reverse-direction special case lets a
//!    polymorphic producer supply a concrete consumer.
//! 3. Applications and function types decompose componentwise, merging
//!    the component constraints.
//! 4. Anything else fits only if structurally equal, contributing no
//!    bindings.
//!
//! [`merge_constraints`] is plain map union; conflicting bindings for the
//! same generic overwrite each other silently.
//!
//! ## Substitution
//!
//! [`replace_generics`] rewrites every bound `Generic` inside a type,
//! recursing structurally and leaving everything else unchanged:
//!
//! ```text
//! // constraints: {a := Int}
//! a -> a        becomes   Int -> Int
//! Maybe a       becomes   Maybe Int
//! ```

use std::collections::HashMap;

use super::ty::Type;

/// Bindings of generic names to concrete types, produced by solving a
/// formal parameter against an actual argument.
pub type Constraints = HashMap<String, Type>;

/// Extract generic bindings from matching `formal` against `actual`.
///
/// Returns `None` when the two types cannot fit together.
pub fn type_constraints(formal: &Type, actual: &Type) -> Option<Constraints> {
    match (formal, actual) {
        (Type::Generic(name), _) => {
            let mut constraints = HashMap::new();
            constraints.insert(name.clone(), actual.clone());
            Some(constraints)
        }
        (Type::Applied(f, t), Type::Applied(g, x)) => {
            match (f.as_ref(), g.as_ref(), x.as_ref()) {
                (Type::TL(left), Type::TL(right), Type::Generic(name)) => {
                    if left == right {
                        let mut constraints = HashMap::new();
                        constraints.insert(name.clone(), t.as_ref().clone());
                        Some(constraints)
                    } else {
                        None
                    }
                }
                _ => {
                    let heads = type_constraints(f, g)?;
                    let args = type_constraints(t, x)?;
                    Some(merge_constraints(heads, args))
                }
            }
        }
        (Type::Lambda(a, b), Type::Lambda(x, y)) => {
            let params = type_constraints(a, x)?;
            let results = type_constraints(b, y)?;
            Some(merge_constraints(params, results))
        }
        _ => {
            if formal == actual {
                Some(HashMap::new())
            } else {
                None
            }
        }
    }
}

/// Union of two constraint maps. Clashes are not detected; a binding from
/// `second` overwrites one from `first`.
pub fn merge_constraints(first: Constraints, second: Constraints) -> Constraints {
    let mut merged = first;
    merged.extend(second);
    merged
}

/// Rewrite every bound `Generic` inside `ty` to its constrained type.
pub fn replace_generics(constraints: &Constraints, ty: &Type) -> Type {
    match ty {
        Type::Generic(name) => match constraints.get(name) {
            Some(bound) => bound.clone(),
            None => ty.clone(),
        },
        Type::Applied(f, a) => Type::applied(
            replace_generics(constraints, f),
            replace_generics(constraints, a),
        ),
        Type::Lambda(t1, t2) => Type::lambda(
            replace_generics(constraints, t1),
            replace_generics(constraints, t2),
        ),
        _ => ty.clone(),
    }
}

/// Two types are considered equal when solving succeeds in the given
/// direction.
pub fn type_eq(a: &Type, b: &Type) -> bool {
    type_constraints(a, b).is_some()
}
