//! # Parser State Management
//!
//! This module provides the core infrastructure for parser combinators:
//! - **ParseState**: Manages token stream position, backtracking, and error tracking
//! - **ParseError**: Structured error type for parse failures
//! - **Parser trait**: Generic interface for all parsers
//!
//! ## Backtracking
//!
//! Parser combinators need to try alternative parsing strategies and fall back
//! when they fail. The `ParseState` supports this through position save/restore:
//!
//! ```text
//! let pos = state.position();     // Save current position
//! match parser.parse(state) {
//!     Ok(result) => result,
//!     Err(_) => {
//!         state.restore(pos);     // Restore and try next alternative
//!         alternative.parse(state)
//!     }
//! }
//! ```
//!
//! ## Furthest-Error Tracking
//!
//! In a backtracking parser the first error is rarely the interesting one; the
//! "real" error is usually at the furthest position the parser was able to
//! reach before failing completely. `ParseState` records that error so the
//! top-level [`crate::parser::grammar::parse`] entry can report it, merging
//! the expected-token lists of alternatives that failed at the same position:
//!
//! ```text
//! error: expected identifier or '(', found '123'
//!   --> file.tree:10:5
//! ```

use lachs::Span;

use crate::lexer::Token;

/// Structured parse error with context information.
///
/// Captures why parsing failed, enabling error messages with source location
/// and the set of constructs that would have been acceptable.
///
/// # Fields
///
/// * `message` - Human-readable error description
/// * `span` - Optional source location for error reporting
/// * `expected` - List of what tokens/constructs were expected
/// * `found` - What was actually found (if available)
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub span: Option<Box<Span>>,
    pub expected: Vec<String>,
    pub found: Option<String>,
}

impl ParseError {
    /// Create a new parse error with a message.
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            span: None,
            expected: vec![],
            found: None,
        }
    }

    /// Add an expected token/construct to this error.
    ///
    /// Used to build up error messages like "expected A, B, or C".
    pub fn expected(mut self, what: impl Into<String>) -> Self {
        self.expected.push(what.into());
        self
    }

    /// Set what was actually found.
    pub fn found(mut self, what: impl Into<String>) -> Self {
        self.found = Some(what.into());
        self
    }

    /// Set source location for this error.
    pub fn at(mut self, span: Span) -> Self {
        self.span = Some(Box::new(span));
        self
    }

    /// Merge expected tokens from another error.
    ///
    /// Used when combining alternative parsers - if both alternatives fail at
    /// the same position, we merge their "expected" lists to show all
    /// possibilities.
    pub fn merge_expected(mut self, other: &ParseError) -> Self {
        for exp in &other.expected {
            if !self.expected.contains(exp) {
                self.expected.push(exp.clone());
            }
        }
        self
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = if !self.expected.is_empty() {
            let expected_str = if self.expected.len() == 1 {
                self.expected[0].clone()
            } else {
                let (last, rest) = self.expected.split_last().unwrap();
                format!("{} or {}", rest.join(", "), last)
            };
            match &self.found {
                Some(found) => format!("expected {}, found {}", expected_str, found),
                None => format!("expected {}", expected_str),
            }
        } else {
            self.message.clone()
        };

        if let Some(span) = &self.span {
            write!(f, "{}", span.to_string(&msg))
        } else {
            write!(f, "Parse error: {}", msg)
        }
    }
}

impl std::error::Error for ParseError {}

/// Result type for parse operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Parser state: token stream, position, and error tracking.
///
/// `ParseState` is the mutable context all parsers operate on. It maintains
/// the current position in the token stream, supports backtracking, and
/// tracks the furthest parse error.
pub struct ParseState {
    /// The complete token stream being parsed
    tokens: Vec<Token>,

    /// Current position in the token stream (index of next token to read)
    index: usize,

    /// Error at the furthest position reached during parsing
    furthest_error: Option<(usize, ParseError)>,
}

impl ParseState {
    /// Create a new parse state from a token stream.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            index: 0,
            furthest_error: None,
        }
    }

    /// Consume and return the next token.
    pub fn advance(&mut self) -> Option<Token> {
        if self.has_next() {
            let token = self.tokens[self.index].clone();
            self.index += 1;
            Some(token)
        } else {
            None
        }
    }

    /// Peek at the next token without consuming it.
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    /// Check if there are more tokens to consume.
    pub fn has_next(&self) -> bool {
        self.index < self.tokens.len()
    }

    /// Get the current position in the token stream.
    ///
    /// Used with [`ParseState::restore`] to implement backtracking.
    pub fn position(&self) -> usize {
        self.index
    }

    /// Restore the parser to a previous position.
    ///
    /// Used for backtracking - if a parser fails, we restore the state to
    /// allow an alternative parser to try from the same position.
    pub fn restore(&mut self, position: usize) {
        self.index = position;
    }

    /// Record an error, keeping track of the furthest position reached.
    ///
    /// ```text
    /// state.record_error(err1)  // At position 5
    /// state.record_error(err2)  // At position 10 - becomes new furthest
    /// state.record_error(err3)  // At position 10 - merged with err2
    /// state.record_error(err4)  // At position 3 - ignored (not furthest)
    /// ```
    pub fn record_error(&mut self, error: ParseError) {
        match &self.furthest_error {
            Some((pos, _)) if *pos > self.index => {
                // Keep the existing error if it's further along
            }
            Some((pos, existing)) if *pos == self.index => {
                // Same position: merge expected tokens
                let merged = existing.clone().merge_expected(&error);
                self.furthest_error = Some((self.index, merged));
            }
            _ => {
                self.furthest_error = Some((self.index, error));
            }
        }
    }

    /// Get the furthest error encountered during parsing.
    pub fn get_furthest_error(&self) -> Option<&ParseError> {
        self.furthest_error.as_ref().map(|(_, e)| e)
    }

    /// Create an error at the current position with span info.
    pub fn error_here(&self, message: impl Into<String>) -> ParseError {
        let msg = message.into();
        match self.peek() {
            Some(tok) => ParseError::new(&msg).at(tok.pos()).found(tok.describe()),
            None => ParseError::new(msg).found("end of input".to_string()),
        }
    }
}

/// Generic parser trait.
///
/// All parsers implement this trait, enabling a unified interface for parser
/// combinators. Any function taking `&mut ParseState` and returning
/// `ParseResult<T>` is a parser.
pub trait Parser<T>: Sized {
    fn parse(&self, state: &mut ParseState) -> ParseResult<T>;
}

/// Auto-implement Parser for functions matching the expected signature.
impl<T, F: Fn(&mut ParseState) -> ParseResult<T>> Parser<T> for F {
    fn parse(&self, state: &mut ParseState) -> ParseResult<T> {
        self(state)
    }
}
