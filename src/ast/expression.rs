use lachs::Span;

use super::pattern::Argument;
use super::Declaration;

#[derive(Debug, Clone)]
pub enum Expression {
    Identifier(Ident),
    Number(Number),
    Float(Float),
    String(StringLiteral),
    Infix(Infix),
    Apply(Apply),
    Case(Case),
    Let(Let),
    BetweenParens(Parens),
}

impl Expression {
    /// Get the source position of this expression
    pub fn position(&self) -> &Span {
        match self {
            Expression::Identifier(ident) => &ident.position,
            Expression::Number(number) => &number.position,
            Expression::Float(float) => &float.position,
            Expression::String(string) => &string.position,
            Expression::Infix(infix) => &infix.position,
            Expression::Apply(apply) => &apply.position,
            Expression::Case(case) => &case.position,
            Expression::Let(le) => &le.position,
            Expression::BetweenParens(parens) => &parens.position,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Ident {
    pub value: String,
    pub position: Span,
}

#[derive(Debug, Clone)]
pub struct Number {
    pub value: i64,
    pub position: Span,
}

#[derive(Debug, Clone)]
pub struct Float {
    pub value: f64,
    pub position: Span,
}

#[derive(Debug, Clone)]
pub struct StringLiteral {
    pub value: String,
    pub position: Span,
}

/// The five built-in infix operators. `++` concatenates strings; the rest
/// work on `Int` or `Float` operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorExpr {
    Add,
    Subtract,
    Multiply,
    Divide,
    StringAdd,
}

impl OperatorExpr {
    pub fn symbol(&self) -> &'static str {
        match self {
            OperatorExpr::Add => "+",
            OperatorExpr::Subtract => "-",
            OperatorExpr::Multiply => "*",
            OperatorExpr::Divide => "/",
            OperatorExpr::StringAdd => "++",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Infix {
    pub op: OperatorExpr,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
    pub position: Span,
}

#[derive(Debug, Clone)]
pub struct Apply {
    pub func: Box<Expression>,
    pub arg: Box<Expression>,
    pub position: Span,
}

#[derive(Debug, Clone)]
pub struct Case {
    pub value: Box<Expression>,
    pub branches: Vec<(Argument, Expression)>,
    pub position: Span,
}

#[derive(Debug, Clone)]
pub struct Let {
    pub declarations: Vec<Declaration>,
    pub body: Box<Expression>,
    pub position: Span,
}

#[derive(Debug, Clone)]
pub struct Parens {
    pub inner: Box<Expression>,
    pub position: Span,
}
