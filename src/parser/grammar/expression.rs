//! Expression parsers for the Tree language
//!
//! Application is juxtaposition, so with no block delimiters an expression
//! has to know where it stops. Before consuming the next atom of an
//! application chain we check whether the upcoming tokens begin a case
//! branch (`pattern ->`), an annotation (`ident ::`), or an equation
//! (`ident =`); if so, the chain ends there. Infix operators have flat
//! precedence and associate to the right.

use crate::ast::expression::{
    Apply, Case, Expression, Infix, Let, OperatorExpr, Parens,
};
use crate::lexer::Token;

use crate::parser::combinators::{
    expect_arrow, expect_case, expect_in, expect_let, expect_lparen, expect_of, expect_rparen,
    BoxedParser,
};
use crate::parser::state::{ParseState, Parser};

use super::literal::{float, ident, number, string_literal};
use super::pattern::argument;
use super::toplevel::declaration;

/// atom := number | float | string | ident | "(" expression ")"
fn atom() -> BoxedParser<Expression> {
    let float_expr = float() >> Expression::Float;
    let int_expr = number() >> Expression::Number;
    let str_expr = string_literal() >> Expression::String;
    let ident_expr = ident().label("expression") >> Expression::Identifier;

    BoxedParser::new(move |state: &mut ParseState| {
        let pos = state.position();
        if let Ok(start) = expect_lparen().parse(state) {
            let inner = expression().parse(state)?;
            let end = expect_rparen().parse(state)?;
            return Ok(Expression::BetweenParens(Parens {
                inner: Box::new(inner),
                position: start.pos().merge(&end.pos()),
            }));
        }
        state.restore(pos);

        (float_expr.clone() | int_expr.clone() | str_expr.clone() | ident_expr.clone())
            .parse(state)
    })
}

/// Check whether the upcoming tokens begin a case branch, an annotation, or
/// an equation rather than further atoms of the current application chain.
fn at_expression_boundary(state: &mut ParseState) -> bool {
    let pos = state.position();
    let is_branch =
        argument().parse(state).is_ok() && expect_arrow().parse(state).is_ok();
    state.restore(pos);
    if is_branch {
        return true;
    }

    let is_declaration = ident().parse(state).is_ok()
        && matches!(
            state.peek(),
            Some(Token::Equals(_)) | Some(Token::DoubleColon(_))
        );
    state.restore(pos);
    is_declaration
}

/// application := atom+   (left-associated)
fn application() -> BoxedParser<Expression> {
    BoxedParser::new(move |state: &mut ParseState| {
        let mut expr = atom().parse(state)?;

        loop {
            if at_expression_boundary(state) {
                break;
            }
            let pos = state.position();
            match atom().parse(state) {
                Ok(arg) => {
                    let position = expr.position().merge(arg.position());
                    expr = Expression::Apply(Apply {
                        func: Box::new(expr),
                        arg: Box::new(arg),
                        position,
                    });
                }
                Err(_) => {
                    state.restore(pos);
                    break;
                }
            }
        }

        Ok(expr)
    })
}

/// infix := application (("+" | "-" | "*" | "/" | "++") expression)?
///
/// Right-recursive with flat precedence: `a + b * c` is `a + (b * c)`.
fn infix_expression() -> BoxedParser<Expression> {
    BoxedParser::new(move |state: &mut ParseState| {
        let left = application().parse(state)?;

        let op = match state.peek() {
            Some(Token::DoublePlus(_)) => Some(OperatorExpr::StringAdd),
            Some(Token::Plus(_)) => Some(OperatorExpr::Add),
            Some(Token::Minus(_)) => Some(OperatorExpr::Subtract),
            Some(Token::Star(_)) => Some(OperatorExpr::Multiply),
            Some(Token::Slash(_)) => Some(OperatorExpr::Divide),
            _ => None,
        };

        match op {
            Some(op) => {
                state.advance();
                let right = expression().parse(state)?;
                let position = left.position().merge(right.position());
                Ok(Expression::Infix(Infix {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                    position,
                }))
            }
            None => Ok(left),
        }
    })
}

/// case := "case" expression "of" (argument "->" expression)+
fn case_expression() -> BoxedParser<Expression> {
    BoxedParser::new(move |state: &mut ParseState| {
        let start = expect_case().parse(state)?.pos();
        let value = expression().parse(state)?;
        expect_of().parse(state)?;

        let branch = (argument() - expect_arrow()) + expression();
        let mut branches = Vec::new();
        loop {
            let pos = state.position();
            match branch.parse(state) {
                Ok(branch) => branches.push(branch),
                Err(err) => {
                    state.restore(pos);
                    if branches.is_empty() {
                        return Err(err.expected("case branch"));
                    }
                    break;
                }
            }
        }

        let position = match branches.last() {
            Some((_, body)) => start.merge(body.position()),
            None => start,
        };
        Ok(Expression::Case(Case {
            value: Box::new(value),
            branches,
            position,
        }))
    })
}

/// let := "let" declaration+ "in" expression
fn let_expression() -> BoxedParser<Expression> {
    BoxedParser::new(move |state: &mut ParseState| {
        let start = expect_let().parse(state)?.pos();

        let mut declarations = Vec::new();
        loop {
            let pos = state.position();
            match declaration().parse(state) {
                Ok(decl) => declarations.push(decl),
                Err(err) => {
                    state.restore(pos);
                    if declarations.is_empty() {
                        return Err(err.expected("declaration"));
                    }
                    break;
                }
            }
        }

        expect_in().parse(state)?;
        let body = expression().parse(state)?;
        let position = start.merge(body.position());
        Ok(Expression::Let(Let {
            declarations,
            body: Box::new(body),
            position,
        }))
    })
}

/// expression := case | let | infix
pub fn expression() -> BoxedParser<Expression> {
    BoxedParser::new(move |state: &mut ParseState| {
        match state.peek() {
            Some(Token::Case(_)) => case_expression().parse(state),
            Some(Token::Let(_)) => let_expression().parse(state),
            _ => infix_expression().parse(state),
        }
    })
}
