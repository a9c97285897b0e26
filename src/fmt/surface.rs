//! Pretty printer for the untyped Tree AST
//!
//! Prints a parsed module back out as Tree source. Case branches and let
//! declarations go on their own lines purely for readability; the grammar
//! is whitespace-insensitive.

use std::fmt::{self, Display};

use crate::ast::expression::Expression;
use crate::ast::pattern::Argument;
use crate::ast::{
    Annotation, AnnotationType, Constructor, ConstructorType, DataType, Declaration, Module,
    TopLevel,
};

impl Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for top_level in &self.top_levels {
            if !first {
                writeln!(f)?;
                writeln!(f)?;
            }
            first = false;
            write!(f, "{}", top_level)?;
        }
        Ok(())
    }
}

impl Display for TopLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopLevel::DataType(data_type) => write!(f, "{}", data_type),
            TopLevel::Function(declaration) => write!(f, "{}", declaration),
        }
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data {}", self.name.value)?;
        for generic in &self.generics {
            write!(f, " {}", generic.value)?;
        }
        write!(f, " = ")?;
        let mut first = true;
        for constructor in &self.constructors {
            if !first {
                write!(f, " | ")?;
            }
            first = false;
            write!(f, "{}", constructor)?;
        }
        Ok(())
    }
}

impl Display for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name.value)?;
        if let Some(ty) = &self.ty {
            write!(f, " {}", ty)?;
        }
        Ok(())
    }
}

impl Display for ConstructorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstructorType::Concrete(ident) => write!(f, "{}", ident.value),
            ConstructorType::Applied(left, right) => write!(f, "{} {}", left, right),
            ConstructorType::Parenthesized(inner) => write!(f, "({})", inner),
        }
    }
}

impl Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(annotation) = &self.annotation {
            writeln!(f, "{}", annotation)?;
        }
        write!(f, "{}", self.name.value)?;
        for arg in &self.args {
            write!(f, " ")?;
            fmt_argument_atom(arg, f)?;
        }
        write!(f, " = {}", self.body)
    }
}

impl Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ::", self.name.value)?;
        let mut first = true;
        for ty in &self.types {
            if first {
                write!(f, " {}", ty)?;
            } else {
                write!(f, " -> {}", ty)?;
            }
            first = false;
        }
        Ok(())
    }
}

impl Display for AnnotationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotationType::Concrete(ident) => write!(f, "{}", ident.value),
            AnnotationType::TypeApplication(left, right) => write!(f, "{} {}", left, right),
            AnnotationType::Parenthesized(types) => {
                write!(f, "(")?;
                let mut first = true;
                for ty in types {
                    if !first {
                        write!(f, " -> ")?;
                    }
                    first = false;
                    write!(f, "{}", ty)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Print a pattern in atom position: a deconstruction with arguments needs
/// parentheses there.
fn fmt_argument_atom(argument: &Argument, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match argument {
        Argument::Deconstruction(deconstruction) if !deconstruction.args.is_empty() => {
            write!(f, "({})", argument)
        }
        _ => write!(f, "{}", argument),
    }
}

impl Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Identifier(ident) => write!(f, "{}", ident.value),
            Argument::NumberLiteral(number) => write!(f, "{}", number.value),
            Argument::Deconstruction(deconstruction) => {
                write!(f, "{}", deconstruction.constructor.value)?;
                for arg in &deconstruction.args {
                    write!(f, " ")?;
                    fmt_argument_atom(arg, f)?;
                }
                Ok(())
            }
        }
    }
}

/// Print a float so that it still lexes as a float.
fn fmt_float(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(ident) => write!(f, "{}", ident.value),
            Expression::Number(number) => write!(f, "{}", number.value),
            Expression::Float(float) => write!(f, "{}", fmt_float(float.value)),
            Expression::String(string) => write!(f, "\"{}\"", string.value),
            Expression::Infix(infix) => {
                write!(f, "{} {} {}", infix.left, infix.op.symbol(), infix.right)
            }
            Expression::Apply(apply) => write!(f, "{} {}", apply.func, apply.arg),
            Expression::Case(case) => {
                write!(f, "case {} of", case.value)?;
                for (pattern, body) in &case.branches {
                    write!(f, "\n    {} -> {}", pattern, body)?;
                }
                Ok(())
            }
            Expression::Let(le) => {
                write!(f, "let")?;
                for declaration in &le.declarations {
                    write!(f, "\n    {}", declaration)?;
                }
                write!(f, "\nin {}", le.body)
            }
            Expression::BetweenParens(parens) => write!(f, "({})", parens.inner),
        }
    }
}
