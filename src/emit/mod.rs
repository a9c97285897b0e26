//! WebAssembly text emitter
//!
//! Lowers a [`TypedModule`] to a `(module …)` in WebAssembly text format.
//! Every declaration is exported under its own name and becomes a function
//! with `i32` parameters and an `i32` result. Case expressions lower to
//! nested `(select …)` instructions whose comparators are generated in
//! reverse order from the branch list; `let` bindings become locals set
//! before the body runs.
//!
//! The emitter is deliberately mechanical: string payloads and constructor
//! fields live in the runtime's data layout, which is not part of this
//! crate, so they lower to placeholder constants.

use crate::ast::expression::OperatorExpr;
use crate::typed::{TypedArgument, TypedDeclaration, TypedExpression, TypedModule};
use crate::types::ty::Type;

const INDENT: &str = "  ";

struct Formatter {
    buffer: String,
    indent_level: usize,
}

impl Formatter {
    fn new() -> Self {
        Self {
            buffer: String::new(),
            indent_level: 0,
        }
    }

    fn indent(&mut self) {
        self.indent_level += 1;
    }

    fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(INDENT);
        }
    }

    fn write_str(&mut self, s: &str) {
        self.buffer.push_str(s);
    }

    fn write_newline(&mut self) {
        self.buffer.push('\n');
    }

    fn finish(self) -> String {
        self.buffer
    }
}

/// Emit a checked module as WebAssembly text.
pub fn emit_module(module: &TypedModule) -> String {
    let mut fmt = Formatter::new();

    fmt.write_str("(module");
    fmt.indent();
    for declaration in &module.declarations {
        fmt.write_newline();
        fmt.write_indent();
        fmt.write_str(&format!(
            "(export \"{}\" (func ${}))",
            declaration.name, declaration.name
        ));
        fmt.write_newline();
        fmt.write_indent();
        emit_declaration(declaration, &mut fmt);
    }
    fmt.dedent();
    fmt.write_newline();
    fmt.write_str(")");
    fmt.write_newline();
    fmt.finish()
}

fn emit_declaration(declaration: &TypedDeclaration, fmt: &mut Formatter) {
    let params: Vec<String> = declaration
        .args
        .iter()
        .enumerate()
        .map(|(i, arg)| match arg {
            TypedArgument::Identifier(_, name) => name.clone(),
            _ => format!("arg{}", i),
        })
        .collect();

    let mut locals = Vec::new();
    for arg in &declaration.args {
        if let TypedArgument::Deconstruction(_, _, sub_args) = arg {
            for sub in sub_args {
                collect_pattern_binders(sub, &mut locals);
            }
        }
    }
    collect_locals(&declaration.body, &mut locals);
    locals.retain(|local| !params.contains(local));

    let mut names: Vec<String> = params.clone();
    names.extend(locals.iter().cloned());

    fmt.write_str(&format!("(func ${}", declaration.name));
    for param in &params {
        fmt.write_str(&format!(" (param ${} i32)", param));
    }
    fmt.write_str(" (result i32)");
    fmt.indent();
    for local in &locals {
        fmt.write_newline();
        fmt.write_indent();
        fmt.write_str(&format!("(local ${} i32)", local));
    }
    fmt.write_newline();
    fmt.write_indent();
    fmt.write_str(&emit_expression(&declaration.body, &names));
    fmt.write_str(")");
    fmt.dedent();
}

/// Names bound by `let` blocks and case patterns anywhere inside `expr`;
/// they all become function locals.
fn collect_locals(expr: &TypedExpression, out: &mut Vec<String>) {
    match expr {
        TypedExpression::Let(declarations, body) => {
            for declaration in declarations {
                if !out.contains(&declaration.name) {
                    out.push(declaration.name.clone());
                }
                collect_locals(&declaration.body, out);
            }
            collect_locals(body, out);
        }
        TypedExpression::Case(_, value, branches) => {
            collect_locals(value, out);
            for (pattern, body) in branches {
                collect_pattern_binders(pattern, out);
                collect_locals(body, out);
            }
        }
        TypedExpression::Infix(_, _, left, right) => {
            collect_locals(left, out);
            collect_locals(right, out);
        }
        TypedExpression::Apply(_, func, arg) => {
            collect_locals(func, out);
            collect_locals(arg, out);
        }
        _ => {}
    }
}

fn collect_pattern_binders(pattern: &TypedArgument, out: &mut Vec<String>) {
    match pattern {
        TypedArgument::Identifier(_, name) => {
            if !out.contains(name) {
                out.push(name.clone());
            }
        }
        TypedArgument::NumberLiteral(_) => {}
        TypedArgument::Deconstruction(_, _, sub_args) => {
            for sub in sub_args {
                collect_pattern_binders(sub, out);
            }
        }
    }
}

fn emit_expression(expr: &TypedExpression, names: &[String]) -> String {
    match expr {
        TypedExpression::Number(n) => format!("(i32.const {})", n),
        TypedExpression::Float(x) => format!("(f32.const {})", x),
        // string payloads live in the runtime's data segment; emit a null
        // pointer until linking exists
        TypedExpression::String(_) => "(i32.const 0)".to_string(),
        TypedExpression::Identifier(_, name) => {
            if names.contains(name) {
                format!("(get_local ${})", name)
            } else {
                format!("(call ${})", name)
            }
        }
        TypedExpression::Infix(ty, op, left, right) => format!(
            "({} {} {})",
            infix_opcode(op, ty),
            emit_expression(left, names),
            emit_expression(right, names)
        ),
        TypedExpression::Apply(_, _, _) => emit_apply(expr, names),
        TypedExpression::Case(_, value, branches) => emit_case(value, branches, names),
        TypedExpression::Let(declarations, body) => {
            let mut parts: Vec<String> = declarations
                .iter()
                .map(|d| format!("(set_local ${} {})", d.name, emit_expression(&d.body, names)))
                .collect();
            parts.push(emit_expression(body, names));
            parts.join(" ")
        }
        TypedExpression::ADTConstruction(tag, _) => format!("(i32.const {})", tag),
    }
}

fn infix_opcode(op: &OperatorExpr, ty: &Type) -> &'static str {
    match (op, ty) {
        (OperatorExpr::Add, Type::Float) => "f32.add",
        (OperatorExpr::Subtract, Type::Float) => "f32.sub",
        (OperatorExpr::Multiply, Type::Float) => "f32.mul",
        (OperatorExpr::Divide, Type::Float) => "f32.div",
        (OperatorExpr::Add, _) => "i32.add",
        (OperatorExpr::Subtract, _) => "i32.sub",
        (OperatorExpr::Multiply, _) => "i32.mul",
        (OperatorExpr::Divide, _) => "i32.div_s",
        (OperatorExpr::StringAdd, _) => "i32.add",
    }
}

/// Flatten a curried application spine into one `(call $f a b …)`.
fn emit_apply(expr: &TypedExpression, names: &[String]) -> String {
    let mut args = Vec::new();
    let mut head = expr;
    while let TypedExpression::Apply(_, func, arg) = head {
        args.push(arg.as_ref());
        head = func.as_ref();
    }
    args.reverse();

    match head {
        TypedExpression::Identifier(_, name) => {
            let mut code = format!("(call ${}", name);
            for arg in args {
                code.push(' ');
                code.push_str(&emit_expression(arg, names));
            }
            code.push(')');
            code
        }
        // First-class function values are outside the emitted subset.
        other => emit_expression(other, names),
    }
}

/// Nested `(select then else cond)` chain; comparators are generated in
/// reverse order from the branch list.
fn emit_case(
    value: &TypedExpression,
    branches: &[(TypedArgument, TypedExpression)],
    names: &[String],
) -> String {
    let scrutinee = emit_expression(value, names);

    let (last, rest) = match branches.split_last() {
        Some(split) => split,
        None => return scrutinee,
    };

    let mut code = emit_expression(&last.1, names);
    for (pattern, body) in rest.iter().rev() {
        code = format!(
            "(select {} {} {})",
            emit_expression(body, names),
            code,
            pattern_comparator(pattern, &scrutinee)
        );
    }
    code
}

fn pattern_comparator(pattern: &TypedArgument, scrutinee: &str) -> String {
    match pattern {
        TypedArgument::NumberLiteral(n) => {
            format!("(i32.eq {} (i32.const {}))", scrutinee, n)
        }
        TypedArgument::Identifier(_, _) => "(i32.const 1)".to_string(),
        TypedArgument::Deconstruction(_, tag, _) => {
            format!("(i32.eq {} (i32.const {}))", scrutinee, tag)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ty::Type;

    fn declaration(name: &str, body: TypedExpression) -> TypedDeclaration {
        TypedDeclaration {
            name: name.to_string(),
            ty: Type::Num,
            args: vec![],
            body,
        }
    }

    #[test]
    fn test_emit_constant_function() {
        let module = TypedModule {
            declarations: vec![declaration("main", TypedExpression::Number(42))],
        };
        let wat = emit_module(&module);
        assert!(wat.contains("(export \"main\" (func $main))"));
        assert!(wat.contains("(func $main (result i32)"));
        assert!(wat.contains("(i32.const 42)"));
    }

    #[test]
    fn test_emit_parameters_and_infix() {
        let body = TypedExpression::Infix(
            Type::Num,
            OperatorExpr::Add,
            Box::new(TypedExpression::Identifier(Type::Num, "x".to_string())),
            Box::new(TypedExpression::Number(1)),
        );
        let module = TypedModule {
            declarations: vec![TypedDeclaration {
                name: "incr".to_string(),
                ty: Type::lambda(Type::Num, Type::Num),
                args: vec![TypedArgument::Identifier(Type::Num, "x".to_string())],
                body,
            }],
        };
        let wat = emit_module(&module);
        assert!(wat.contains("(func $incr (param $x i32) (result i32)"));
        assert!(wat.contains("(i32.add (get_local $x) (i32.const 1))"));
    }

    #[test]
    fn test_emit_case_selects_in_reverse_order() {
        // case n of 0 -> 10, 1 -> 20, _ -> 30
        let body = TypedExpression::Case(
            Type::Num,
            Box::new(TypedExpression::Identifier(Type::Num, "n".to_string())),
            vec![
                (TypedArgument::NumberLiteral(0), TypedExpression::Number(10)),
                (TypedArgument::NumberLiteral(1), TypedExpression::Number(20)),
                (
                    TypedArgument::Identifier(Type::Num, "other".to_string()),
                    TypedExpression::Number(30),
                ),
            ],
        );
        let module = TypedModule {
            declarations: vec![TypedDeclaration {
                name: "pick".to_string(),
                ty: Type::lambda(Type::Num, Type::Num),
                args: vec![TypedArgument::Identifier(Type::Num, "n".to_string())],
                body,
            }],
        };
        let wat = emit_module(&module);
        assert!(wat.contains(
            "(select (i32.const 10) \
             (select (i32.const 20) (i32.const 30) \
             (i32.eq (get_local $n) (i32.const 1))) \
             (i32.eq (get_local $n) (i32.const 0)))"
        ));
    }

    #[test]
    fn test_emit_let_becomes_locals() {
        let body = TypedExpression::Let(
            vec![TypedDeclaration {
                name: "x".to_string(),
                ty: Type::Num,
                args: vec![],
                body: TypedExpression::Number(7),
            }],
            Box::new(TypedExpression::Identifier(Type::Num, "x".to_string())),
        );
        let module = TypedModule {
            declarations: vec![declaration("main", body)],
        };
        let wat = emit_module(&module);
        assert!(wat.contains("(local $x i32)"));
        assert!(wat.contains("(set_local $x (i32.const 7)) (get_local $x)"));
    }

    #[test]
    fn test_emit_call_for_free_identifiers() {
        let body = TypedExpression::Apply(
            Type::Num,
            Box::new(TypedExpression::Identifier(
                Type::lambda(Type::Num, Type::Num),
                "incr".to_string(),
            )),
            Box::new(TypedExpression::Number(4)),
        );
        let module = TypedModule {
            declarations: vec![declaration("main", body)],
        };
        let wat = emit_module(&module);
        assert!(wat.contains("(call $incr (i32.const 4))"));
    }

    #[test]
    fn test_emit_constructor_tag() {
        let module = TypedModule {
            declarations: vec![declaration(
                "Nothing",
                TypedExpression::ADTConstruction(0, vec![]),
            )],
        };
        let wat = emit_module(&module);
        assert!(wat.contains("(func $Nothing (result i32)"));
        assert!(wat.contains("(i32.const 0)"));
    }
}
