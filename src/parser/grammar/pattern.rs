//! Pattern parsers for the Tree language
//!
//! An uppercase-initial identifier in pattern position names a constructor;
//! everything else binds or matches a literal. Function equations take
//! *atoms* (a deconstruction with arguments must be parenthesized there),
//! while case branches take full patterns (`Just n ->` needs no parens).

use crate::ast::pattern::{Argument, Deconstruction, NumberPattern};
use crate::lexer::Token;

use crate::parser::combinators::{expect_lparen, expect_rparen, BoxedParser};
use crate::parser::state::{ParseState, Parser};

use super::literal::{ident, number};

fn starts_uppercase(value: &str) -> bool {
    value.chars().next().is_some_and(|c| c.is_uppercase())
}

/// argument_atom := number | ident | "(" argument ")"
///
/// A bare uppercase identifier is a nullary deconstruction.
pub fn argument_atom() -> BoxedParser<Argument> {
    BoxedParser::new(move |state: &mut ParseState| {
        let pos = state.position();
        if expect_lparen().parse(state).is_ok() {
            let inner = argument().parse(state)?;
            expect_rparen().parse(state)?;
            return Ok(inner);
        }
        state.restore(pos);

        if matches!(state.peek(), Some(Token::Integer(_))) {
            let n = number().parse(state)?;
            return Ok(Argument::NumberLiteral(NumberPattern {
                value: n.value,
                position: n.position,
            }));
        }

        let id = ident().label("pattern").parse(state)?;
        if starts_uppercase(&id.value) {
            let position = id.position.clone();
            Ok(Argument::Deconstruction(Deconstruction {
                constructor: id,
                args: vec![],
                position,
            }))
        } else {
            Ok(Argument::Identifier(id))
        }
    })
}

/// argument := deconstruction | argument_atom
///
/// In case-branch position a constructor consumes its argument atoms
/// directly: `Cons x rest -> …`.
pub fn argument() -> BoxedParser<Argument> {
    BoxedParser::new(move |state: &mut ParseState| {
        if let Some(Token::Ident(id)) = state.peek() {
            if starts_uppercase(&id.value) {
                let constructor = ident().parse(state)?;
                let mut args = Vec::new();
                loop {
                    let pos = state.position();
                    match argument_atom().parse(state) {
                        Ok(arg) => args.push(arg),
                        Err(_) => {
                            state.restore(pos);
                            break;
                        }
                    }
                }
                let position = match args.last() {
                    Some(last) => constructor.position.merge(last.position()),
                    None => constructor.position.clone(),
                };
                return Ok(Argument::Deconstruction(Deconstruction {
                    constructor,
                    args,
                    position,
                }));
            }
        }

        argument_atom().parse(state)
    })
}
