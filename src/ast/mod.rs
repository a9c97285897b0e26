//! # Untyped AST - Abstract Syntax Tree for Parsed Tree Modules
//!
//! This module defines the tree structure the parser produces for a `.tree`
//! source file, before any type information exists.
//!
//! ## Pipeline Position
//!
//! ```text
//! Lexer → Token Stream → Parser → [UNTYPED AST] → Type Checker → Typed AST
//! ```
//!
//! A module is an ordered sequence of top-level items. A top-level item is
//! either a data-type declaration or a function declaration:
//!
//! ```tree
//! data Maybe a = Nothing | Just a
//!
//! withDefault :: Int -> Maybe Int -> Int
//! withDefault fallback m = case m of
//!     Just n -> n
//!     Nothing -> fallback
//! ```
//!
//! Every node carries its source range as a [`lachs::Span`] so that the type
//! checker can point error messages at the offending code.
//!
//! ## Module Organization
//!
//! - Top-level items (this module): [`Module`], [`DataType`], [`Declaration`],
//!   [`Annotation`]
//! - [`expression`] - Expressions (case, let, application, infix, literals)
//! - [`pattern`] - Argument patterns (binders, deconstructions, literals)

use lachs::Span;

pub mod expression;
pub mod pattern;

use expression::{Expression, Ident};
use pattern::Argument;

/// A complete Tree module: the ordered top-level items of one source file.
#[derive(Debug, Clone)]
pub struct Module {
    pub top_levels: Vec<TopLevel>,
}

/// A single top-level item.
#[derive(Debug, Clone)]
pub enum TopLevel {
    DataType(DataType),
    Function(Declaration),
}

/// A data-type declaration: a named head, its generic parameters, and a
/// non-empty list of constructors.
///
/// ```tree
/// data Result error value = Err error | Ok value
/// ```
#[derive(Debug, Clone)]
pub struct DataType {
    pub name: Ident,
    pub generics: Vec<Ident>,
    pub constructors: Vec<Constructor>,
    pub position: Span,
}

/// One constructor of a data type. `ty` is absent for nullary constructors.
#[derive(Debug, Clone)]
pub struct Constructor {
    pub name: Ident,
    pub ty: Option<ConstructorType>,
    pub position: Span,
}

/// The syntactic shape of a constructor's field list.
///
/// `Applied` chains concatenate into multiple fields during checking, while
/// `Parenthesized` groups an applied type constructor into a single field:
/// `Cons a (List a)` reads as two fields, `a` and `List a`.
#[derive(Debug, Clone)]
pub enum ConstructorType {
    Concrete(Ident),
    Applied(Box<ConstructorType>, Box<ConstructorType>),
    Parenthesized(Box<ConstructorType>),
}

/// A function declaration: optional annotation, name, argument patterns, and
/// the body expression. Used both at the top level and inside `let` blocks.
#[derive(Debug, Clone)]
pub struct Declaration {
    pub annotation: Option<Annotation>,
    pub name: Ident,
    pub args: Vec<Argument>,
    pub body: Expression,
    pub position: Span,
}

/// The `name :: a -> b -> c` signature preceding an equation. The list is
/// read as a right-associated arrow chain; the last element is the return
/// type.
#[derive(Debug, Clone)]
pub struct Annotation {
    pub name: Ident,
    pub types: Vec<AnnotationType>,
    pub position: Span,
}

/// One element of an annotation's arrow chain.
#[derive(Debug, Clone)]
pub enum AnnotationType {
    Concrete(Ident),
    Parenthesized(Vec<AnnotationType>),
    TypeApplication(Box<AnnotationType>, Box<AnnotationType>),
}

impl AnnotationType {
    /// Get the source position of this annotation type
    pub fn position(&self) -> Span {
        match self {
            AnnotationType::Concrete(ident) => ident.position.clone(),
            AnnotationType::Parenthesized(types) => types
                .first()
                .map(AnnotationType::position)
                .unwrap_or_default(),
            AnnotationType::TypeApplication(head, _) => head.position(),
        }
    }
}
