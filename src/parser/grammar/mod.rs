//! Grammar module for the Tree language
//!
//! This module contains all the parsing rules organized by category:
//! - `literal`: Basic literals (identifiers, integers, floats, strings)
//! - `pattern`: Argument patterns (binders, deconstructions, number literals)
//! - `expression`: Expression forms (case, let, infix, application)
//! - `toplevel`: Data types, annotations, and function declarations

mod expression;
mod literal;
mod pattern;
mod toplevel;

pub use expression::expression;
pub use pattern::{argument, argument_atom};
pub use toplevel::{data_type, declaration};

use crate::ast::{Module, TopLevel};
use crate::lexer::Token;

use super::combinators::BoxedParser;
use super::state::{ParseResult, ParseState, Parser};

/// module := (data_type | declaration)*
pub fn module() -> BoxedParser<Module> {
    BoxedParser::new(move |state: &mut ParseState| {
        let mut top_levels = Vec::new();
        while state.has_next() {
            if matches!(state.peek(), Some(Token::Data(_))) {
                top_levels.push(TopLevel::DataType(data_type().parse(state)?));
            } else {
                top_levels.push(TopLevel::Function(declaration().parse(state)?));
            }
        }
        Ok(Module { top_levels })
    })
}

/// Parse a complete module from the token stream.
///
/// On failure the furthest error reached during parsing is reported; no
/// recovery is attempted.
pub fn parse(state: &mut ParseState) -> ParseResult<Module> {
    match module().parse(state) {
        Ok(module) => Ok(module),
        Err(err) => Err(state.get_furthest_error().cloned().unwrap_or(err)),
    }
}
