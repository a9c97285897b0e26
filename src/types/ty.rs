//! # Core Type System Definitions
//!
//! This module defines the type language of Tree: primitives, declared
//! data-type heads, type-level application, function types, and generics.
//!
//! ## Overview
//!
//! - `Num`, `Float`, `Str` - the built-in `Int`, `Float`, `String` types
//! - `TL(TypeLambda)` - a declared data type's head, e.g. `Maybe`
//! - `Applied(f, a)` - type-level application, left-associative:
//!   `Result e a` is `Applied(Applied(TL Result, e), a)`
//! - `Lambda(a, b)` - the function type `a -> b`, right-associative
//! - `Generic(name)` - an unbound generic parameter, written lowercase
//!
//! ## Equality
//!
//! Equality on `Type` is structural. A `Generic` equals nothing but an
//! identical `Generic`; generics are eliminated by the constraint solver
//! ([`crate::types::constraints`]), never by equality.

use std::fmt;

/// The head of a declared data type, i.e. its name considered as a type
/// constructor awaiting its generic arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeLambda {
    pub name: String,
}

impl TypeLambda {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// All possible types in Tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Num,
    Float,
    Str,
    TL(TypeLambda),
    Applied(Box<Type>, Box<Type>),
    Lambda(Box<Type>, Box<Type>),
    Generic(String),
}

impl Type {
    /// Create a function type from parameter and return types.
    pub fn lambda(t1: Type, t2: Type) -> Self {
        Type::Lambda(Box::new(t1), Box::new(t2))
    }

    /// Create a type-level application.
    pub fn applied(f: Type, a: Type) -> Self {
        Type::Applied(Box::new(f), Box::new(a))
    }

    /// Create a generic type parameter.
    pub fn generic(name: impl Into<String>) -> Self {
        Type::Generic(name.into())
    }

    /// Create a declared data type's head.
    pub fn type_lambda(name: impl Into<String>) -> Self {
        Type::TL(TypeLambda::new(name))
    }

    /// The head type lambda of an `Applied` spine, if any.
    ///
    /// `Result e a` and `Result` both have head `Result`; `Int` has none.
    pub fn head(&self) -> Option<&TypeLambda> {
        match self {
            Type::TL(head) => Some(head),
            Type::Applied(f, _) => f.head(),
            _ => None,
        }
    }

    /// Whether a `Generic` occurs anywhere inside this type.
    pub fn contains_generic(&self) -> bool {
        match self {
            Type::Num | Type::Float | Type::Str | Type::TL(_) => false,
            Type::Generic(_) => true,
            Type::Applied(f, a) => f.contains_generic() || a.contains_generic(),
            Type::Lambda(t1, t2) => t1.contains_generic() || t2.contains_generic(),
        }
    }

    /// Convert this type to its source-level string representation.
    ///
    /// ```text
    /// Num.pretty()                          // "Int"
    /// Lambda(Num, Str).pretty()             // "Int -> String"
    /// Lambda(Lambda(Num, Num), Str).pretty() // "(Int -> Int) -> String"
    /// Applied(Applied(TL Result, e), a)     // "Result e a"
    /// Applied(TL Maybe, Applied(TL Maybe, Num)) // "Maybe (Maybe Int)"
    /// ```
    pub fn pretty(&self) -> String {
        match self {
            Type::Num => "Int".to_string(),
            Type::Float => "Float".to_string(),
            Type::Str => "String".to_string(),
            Type::TL(head) => head.name.clone(),
            Type::Generic(name) => name.clone(),
            Type::Applied(f, a) => {
                let arg = if matches!(**a, Type::Applied(_, _) | Type::Lambda(_, _)) {
                    format!("({})", a.pretty())
                } else {
                    a.pretty()
                };
                format!("{} {}", f.pretty(), arg)
            }
            Type::Lambda(t1, t2) => {
                let param = if matches!(**t1, Type::Lambda(_, _)) {
                    format!("({})", t1.pretty())
                } else {
                    t1.pretty()
                };
                format!("{} -> {}", param, t2.pretty())
            }
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.pretty())
    }
}
