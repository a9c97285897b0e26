//! # Compile Error Definitions
//!
//! This module defines the error type for the type-checking phase. Every
//! error names the construct it arose from:
//!
//! - `Declaration` - missing annotation, annotation/argument arity mismatch,
//!   return-type mismatch, unknown type in an annotation
//! - `Expression` - unknown identifier, ill-typed application or infix,
//!   inconsistent case branches, bad deconstruction
//! - `DataType` - unknown type name in a constructor field
//!
//! Messages are complete English sentences containing the offending names
//! and printed types. When the attached span carries source text, `Display`
//! renders the message with its location context.

use std::fmt;

use lachs::Span;

/// A compile error produced by the type checker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    Declaration { message: String, span: Span },
    Expression { message: String, span: Span },
    DataType { message: String, span: Span },
}

impl CompileError {
    /// Create an error for a broken function declaration.
    pub fn declaration(message: impl Into<String>, span: Span) -> Self {
        CompileError::Declaration {
            message: message.into(),
            span,
        }
    }

    /// Create an error for an ill-typed expression.
    pub fn expression(message: impl Into<String>, span: Span) -> Self {
        CompileError::Expression {
            message: message.into(),
            span,
        }
    }

    /// Create an error for a broken data-type declaration.
    pub fn data_type(message: impl Into<String>, span: Span) -> Self {
        CompileError::DataType {
            message: message.into(),
            span,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            CompileError::Declaration { message, .. } => message,
            CompileError::Expression { message, .. } => message,
            CompileError::DataType { message, .. } => message,
        }
    }

    pub fn span(&self) -> &Span {
        match self {
            CompileError::Declaration { span, .. } => span,
            CompileError::Expression { span, .. } => span,
            CompileError::DataType { span, .. } => span,
        }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let span = self.span();
        if span.source.is_empty() {
            write!(f, "Compile error: {}", self.message())
        } else {
            write!(f, "{}", span.to_string(self.message()))
        }
    }
}

impl std::error::Error for CompileError {}
