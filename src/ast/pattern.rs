//! Argument patterns for function equations and case branches.
//!
//! A pattern either binds the matched value to a name, matches a specific
//! integer literal, or deconstructs a data-type value into its fields:
//!
//! ```tree
//! withDefault fallback m = case m of
//!     Just n -> n
//!     Nothing -> fallback
//! ```
//!
//! `fallback` and `m` are identifier patterns, `Just n` and `Nothing` are
//! deconstructions. An uppercase-initial identifier in pattern position
//! always names a constructor; lowercase-initial identifiers (and `_`) bind.

use lachs::Span;

use super::expression::Ident;

/// All possible pattern forms in Tree.
#[derive(Debug, Clone)]
pub enum Argument {
    Identifier(Ident),
    Deconstruction(Deconstruction),
    NumberLiteral(NumberPattern),
}

impl Argument {
    /// Get the source position of this pattern
    pub fn position(&self) -> &Span {
        match self {
            Argument::Identifier(ident) => &ident.position,
            Argument::Deconstruction(deconstruction) => &deconstruction.position,
            Argument::NumberLiteral(number) => &number.position,
        }
    }
}

/// A constructor pattern: names a constructor and binds its fields to
/// sub-patterns, e.g. `Just n` or `Cons x (Cons y rest)`.
#[derive(Debug, Clone)]
pub struct Deconstruction {
    pub constructor: Ident,
    pub args: Vec<Argument>,
    pub position: Span,
}

/// Matches one specific integer literal, e.g. the `0` in `case n of 0 -> …`.
#[derive(Debug, Clone)]
pub struct NumberPattern {
    pub value: i64,
    pub position: Span,
}
