use std::ops::{Add, BitOr, Mul, Shr, Sub};
use std::rc::Rc;

use crate::lexer::Token;

use super::state::{ParseError, ParseResult, ParseState, Parser};

// === Boxed Parser for type erasure ===

pub struct BoxedParser<T> {
    parser: Rc<dyn Fn(&mut ParseState) -> ParseResult<T>>,
}

impl<T> Clone for BoxedParser<T> {
    fn clone(&self) -> Self {
        BoxedParser {
            parser: Rc::clone(&self.parser),
        }
    }
}

impl<T: 'static> BoxedParser<T> {
    pub fn new<P: Parser<T> + 'static>(parser: P) -> Self {
        BoxedParser {
            parser: Rc::new(move |state| parser.parse(state)),
        }
    }
}

impl<T> Parser<T> for BoxedParser<T> {
    fn parse(&self, state: &mut ParseState) -> ParseResult<T> {
        (self.parser)(state)
    }
}

// === Combinators as methods ===

impl<T: 'static> BoxedParser<T> {
    /// Sequence: parse self then other, return (T, U)
    pub fn seq<U: 'static>(self, other: BoxedParser<U>) -> BoxedParser<(T, U)> {
        BoxedParser::new(move |state: &mut ParseState| {
            let a = self.parse(state)?;
            let b = other.parse(state)?;
            Ok((a, b))
        })
    }

    /// Keep left: parse self then other, discard other's result
    pub fn skip<U: 'static>(self, other: BoxedParser<U>) -> BoxedParser<T> {
        BoxedParser::new(move |state: &mut ParseState| {
            let a = self.parse(state)?;
            let _ = other.parse(state)?;
            Ok(a)
        })
    }

    /// Keep right: parse self then other, discard self's result
    pub fn skip_left<U: 'static>(self, other: BoxedParser<U>) -> BoxedParser<U> {
        BoxedParser::new(move |state: &mut ParseState| {
            let _ = self.parse(state)?;
            other.parse(state)
        })
    }

    /// Map: transform result
    pub fn map<U: 'static, F: Fn(T) -> U + 'static>(self, f: F) -> BoxedParser<U> {
        BoxedParser::new(move |state: &mut ParseState| {
            let a = self.parse(state)?;
            Ok(f(a))
        })
    }

    /// Choice: try self, if fails try other
    pub fn or(self, other: BoxedParser<T>) -> BoxedParser<T> {
        BoxedParser::new(move |state: &mut ParseState| {
            let pos = state.position();
            match self.parse(state) {
                Ok(a) => Ok(a),
                Err(_) => {
                    state.restore(pos);
                    other.parse(state)
                }
            }
        })
    }

    /// Label: describe what this parser expects in error messages
    pub fn label(self, what: &'static str) -> BoxedParser<T> {
        BoxedParser::new(move |state: &mut ParseState| {
            self.parse(state).map_err(|e| e.expected(what))
        })
    }
}

// === Operator Overloading ===

/// `+` for sequence: A + B -> (A, B)
impl<T: 'static, U: 'static> Add<BoxedParser<U>> for BoxedParser<T> {
    type Output = BoxedParser<(T, U)>;

    fn add(self, rhs: BoxedParser<U>) -> Self::Output {
        self.seq(rhs)
    }
}

/// `-` for keep left: A - B -> A (parse B, discard result)
impl<T: 'static, U: 'static> Sub<BoxedParser<U>> for BoxedParser<T> {
    type Output = BoxedParser<T>;

    fn sub(self, rhs: BoxedParser<U>) -> Self::Output {
        self.skip(rhs)
    }
}

/// `*` for keep right: A * B -> B (parse A, discard result)
impl<T: 'static, U: 'static> Mul<BoxedParser<U>> for BoxedParser<T> {
    type Output = BoxedParser<U>;

    fn mul(self, rhs: BoxedParser<U>) -> Self::Output {
        self.skip_left(rhs)
    }
}

/// `|` for choice: A | B -> A or B
impl<T: 'static> BitOr<BoxedParser<T>> for BoxedParser<T> {
    type Output = BoxedParser<T>;

    fn bitor(self, rhs: BoxedParser<T>) -> Self::Output {
        self.or(rhs)
    }
}

/// `>>` for map: A >> fn -> B
impl<T: 'static, U: 'static, F: Fn(T) -> U + 'static> Shr<F> for BoxedParser<T> {
    type Output = BoxedParser<U>;

    fn shr(self, f: F) -> Self::Output {
        self.map(f)
    }
}

// === Primitive Parsers ===

pub fn token<F: Fn(&Token) -> bool + 'static>(
    expected: &'static str,
    predicate: F,
) -> BoxedParser<Token> {
    BoxedParser::new(move |state: &mut ParseState| match state.peek() {
        Some(tok) if predicate(tok) => Ok(state.advance().unwrap()),
        Some(tok) => {
            let err = ParseError::new("unexpected token")
                .expected(expected)
                .found(tok.describe())
                .at(tok.pos());
            state.record_error(err.clone());
            Err(err)
        }
        None => {
            let err = ParseError::new("unexpected end of input").expected(expected);
            state.record_error(err.clone());
            Err(err)
        }
    })
}

pub fn expect_case() -> BoxedParser<Token> {
    token("'case'", |t| matches!(t, Token::Case(_)))
}

pub fn expect_of() -> BoxedParser<Token> {
    token("'of'", |t| matches!(t, Token::Of(_)))
}

pub fn expect_let() -> BoxedParser<Token> {
    token("'let'", |t| matches!(t, Token::Let(_)))
}

pub fn expect_in() -> BoxedParser<Token> {
    token("'in'", |t| matches!(t, Token::In(_)))
}

pub fn expect_data() -> BoxedParser<Token> {
    token("'data'", |t| matches!(t, Token::Data(_)))
}

pub fn expect_equals() -> BoxedParser<Token> {
    token("'='", |t| matches!(t, Token::Equals(_)))
}

pub fn expect_arrow() -> BoxedParser<Token> {
    token("'->'", |t| matches!(t, Token::Arrow(_)))
}

pub fn expect_double_colon() -> BoxedParser<Token> {
    token("'::'", |t| matches!(t, Token::DoubleColon(_)))
}

pub fn expect_pipe() -> BoxedParser<Token> {
    token("'|'", |t| matches!(t, Token::Pipe(_)))
}

pub fn expect_lparen() -> BoxedParser<Token> {
    token("'('", |t| matches!(t, Token::LParen(_)))
}

pub fn expect_rparen() -> BoxedParser<Token> {
    token("')'", |t| matches!(t, Token::RParen(_)))
}

/// Parse zero or more occurrences
pub fn many<T: 'static>(parser: BoxedParser<T>) -> BoxedParser<Vec<T>> {
    BoxedParser::new(move |state: &mut ParseState| {
        let mut results = Vec::new();
        loop {
            let pos = state.position();
            match parser.parse(state) {
                Ok(item) => results.push(item),
                Err(_) => {
                    state.restore(pos);
                    break;
                }
            }
        }
        Ok(results)
    })
}

/// Parse one or more occurrences
pub fn many1<T: 'static>(parser: BoxedParser<T>) -> BoxedParser<Vec<T>> {
    BoxedParser::new(move |state: &mut ParseState| {
        let first = parser.parse(state)?;
        let mut results = vec![first];
        loop {
            let pos = state.position();
            match parser.parse(state) {
                Ok(item) => results.push(item),
                Err(_) => {
                    state.restore(pos);
                    break;
                }
            }
        }
        Ok(results)
    })
}

/// Optional: parse zero or one
pub fn optional<T: 'static>(parser: BoxedParser<T>) -> BoxedParser<Option<T>> {
    BoxedParser::new(move |state: &mut ParseState| {
        let pos = state.position();
        match parser.parse(state) {
            Ok(item) => Ok(Some(item)),
            Err(_) => {
                state.restore(pos);
                Ok(None)
            }
        }
    })
}
