//! Literal parsers for the Tree language

use crate::ast::expression::{Float, Ident, Number, StringLiteral};
use crate::lexer::Token;

use crate::parser::combinators::BoxedParser;
use crate::parser::state::{ParseError, ParseState};

/// Parse an identifier
pub fn ident() -> BoxedParser<Ident> {
    BoxedParser::new(|state: &mut ParseState| match state.peek() {
        Some(Token::Ident(_)) => {
            if let Some(Token::Ident(id)) = state.advance() {
                Ok(Ident {
                    value: id.value,
                    position: id.position,
                })
            } else {
                unreachable!()
            }
        }
        Some(tok) => {
            let err = ParseError::new("unexpected token")
                .expected("identifier")
                .found(tok.describe())
                .at(tok.pos());
            state.record_error(err.clone());
            Err(err)
        }
        None => {
            let err = ParseError::new("unexpected end of input").expected("identifier");
            state.record_error(err.clone());
            Err(err)
        }
    })
}

/// Parse an integer literal
pub fn number() -> BoxedParser<Number> {
    BoxedParser::new(|state: &mut ParseState| match state.peek() {
        Some(Token::Integer(_)) => {
            if let Some(Token::Integer(int)) = state.advance() {
                Ok(Number {
                    value: int.value.parse().expect("The grammar should prevent this"),
                    position: int.position,
                })
            } else {
                unreachable!()
            }
        }
        Some(tok) => {
            let err = ParseError::new("unexpected token")
                .expected("integer")
                .found(tok.describe())
                .at(tok.pos());
            state.record_error(err.clone());
            Err(err)
        }
        None => {
            let err = ParseError::new("unexpected end of input").expected("integer");
            state.record_error(err.clone());
            Err(err)
        }
    })
}

/// Parse a floating-point literal
pub fn float() -> BoxedParser<Float> {
    BoxedParser::new(|state: &mut ParseState| match state.peek() {
        Some(Token::FloatLiteral(_)) => {
            if let Some(Token::FloatLiteral(fl)) = state.advance() {
                Ok(Float {
                    value: fl.value.parse().expect("The grammar should prevent this"),
                    position: fl.position,
                })
            } else {
                unreachable!()
            }
        }
        Some(tok) => {
            let err = ParseError::new("unexpected token")
                .expected("float")
                .found(tok.describe())
                .at(tok.pos());
            state.record_error(err.clone());
            Err(err)
        }
        None => {
            let err = ParseError::new("unexpected end of input").expected("float");
            state.record_error(err.clone());
            Err(err)
        }
    })
}

/// Parse a string literal, stripping the surrounding quotes
pub fn string_literal() -> BoxedParser<StringLiteral> {
    BoxedParser::new(|state: &mut ParseState| match state.peek() {
        Some(Token::StringLiteral(_)) => {
            if let Some(Token::StringLiteral(s)) = state.advance() {
                Ok(StringLiteral {
                    value: s.value.trim_matches('"').to_string(),
                    position: s.position,
                })
            } else {
                unreachable!()
            }
        }
        Some(tok) => {
            let err = ParseError::new("unexpected token")
                .expected("string")
                .found(tok.describe())
                .at(tok.pos());
            state.record_error(err.clone());
            Err(err)
        }
        None => {
            let err = ParseError::new("unexpected end of input").expected("string");
            state.record_error(err.clone());
            Err(err)
        }
    })
}
