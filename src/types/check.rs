use log::debug;

use crate::ast::expression::{
    Apply, Case, Expression, Infix, Let, OperatorExpr,
};
use crate::ast::pattern::Argument;
use crate::ast::{
    Annotation, AnnotationType, ConstructorType, DataType, Declaration, Module, TopLevel,
};
use crate::typed::{
    TypedArgument, TypedConstructor, TypedDeclaration, TypedExpression, TypedModule,
};

use super::constraints::{replace_generics, type_constraints, type_eq};
use super::env::{CompileState, Scope};
use super::error::CompileError;
use super::ty::Type;

/// Check a whole module.
///
/// Data-type declarations and functions are checked left to right, each
/// seeing everything declared before it. The first error inside one
/// top-level short-circuits that top-level but not the module: errors
/// accumulate across top-levels and a non-empty list fails the compile.
pub fn check_module(module: &Module) -> Result<TypedModule, Vec<CompileError>> {
    let mut state = CompileState::new();

    for top_level in &module.top_levels {
        match top_level {
            TopLevel::DataType(data_type) => check_data_type(&mut state, data_type),
            TopLevel::Function(declaration) => {
                let scope = state.scope();
                match check_declaration(&state, &scope, declaration) {
                    Ok(typed) => {
                        debug!("checked declaration {} : {}", typed.name, typed.ty);
                        state.add_declaration(typed);
                    }
                    Err(error) => state.add_error(error),
                }
            }
        }
    }

    state.into_result()
}

fn starts_lowercase(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_lowercase())
}

fn primitive_type(name: &str) -> Option<Type> {
    match name {
        "Int" => Some(Type::Num),
        "Float" => Some(Type::Float),
        "String" => Some(Type::Str),
        _ => None,
    }
}

/// Single-character argument names (`a`, `b`, `c`, …) for synthesized
/// constructor declarations.
fn argument_name(index: usize) -> String {
    ((b'a' + (index % 26) as u8) as char).to_string()
}

/// Check a data-type declaration.
///
/// The type lambda is registered first so constructor fields can refer to
/// the type being declared. A broken field aborts the whole data type: its
/// errors are recorded and no declarations or constructors are added, but
/// the type lambda stays registered.
fn check_data_type(state: &mut CompileState, data_type: &DataType) {
    let head = state.declare_type_lambda(&data_type.name.value);

    let return_type = data_type.generics.iter().fold(Type::TL(head.clone()), |acc, g| {
        Type::applied(acc, Type::Generic(g.value.clone()))
    });

    let mut errors = Vec::new();
    let mut declarations = Vec::new();
    let mut constructors = Vec::new();

    for (tag, constructor) in data_type.constructors.iter().enumerate() {
        let fields = match &constructor.ty {
            Some(ty) => match resolve_constructor_type(state, data_type, &return_type, ty) {
                Ok(fields) => fields,
                Err(error) => {
                    errors.push(error);
                    continue;
                }
            },
            None => Vec::new(),
        };

        let constructor_type = fields
            .iter()
            .rev()
            .fold(return_type.clone(), |acc, field| {
                Type::lambda(field.clone(), acc)
            });

        let tag = tag as u32;
        let args: Vec<TypedArgument> = fields
            .iter()
            .enumerate()
            .map(|(i, field)| TypedArgument::Identifier(field.clone(), argument_name(i)))
            .collect();

        declarations.push(TypedDeclaration {
            name: constructor.name.value.clone(),
            ty: constructor_type,
            args: args.clone(),
            body: TypedExpression::ADTConstruction(tag, args),
        });
        constructors.push(TypedConstructor {
            name: constructor.name.value.clone(),
            tag,
            fields,
        });
    }

    if errors.is_empty() {
        for declaration in declarations {
            state.add_declaration(declaration);
        }
        for constructor in constructors {
            state.add_constructor(&head, constructor);
        }
    } else {
        for error in errors {
            state.add_error(error);
        }
    }
}

/// Resolve a constructor's field syntax into the list of field types.
fn resolve_constructor_type(
    state: &CompileState,
    data_type: &DataType,
    return_type: &Type,
    ty: &ConstructorType,
) -> Result<Vec<Type>, CompileError> {
    match ty {
        ConstructorType::Concrete(ident) => {
            let name = &ident.value;
            if let Some(primitive) = primitive_type(name) {
                return Ok(vec![primitive]);
            }
            if *name == data_type.name.value {
                return Ok(vec![return_type.clone()]);
            }
            if let Some(known) = state.lookup_type(name) {
                return Ok(vec![known.clone()]);
            }
            if starts_lowercase(name) {
                return Ok(vec![Type::Generic(name.clone())]);
            }
            Err(CompileError::data_type(
                format!("Unknown type \"{}\"", name),
                ident.position.clone(),
            ))
        }
        ConstructorType::Parenthesized(inner) => match inner.as_ref() {
            // An applied type constructor as a single field: (List a)
            ConstructorType::Applied(f, x) => match (f.as_ref(), x.as_ref()) {
                (ConstructorType::Concrete(head), ConstructorType::Concrete(arg)) => {
                    Ok(vec![Type::applied(
                        Type::type_lambda(head.value.clone()),
                        Type::Generic(arg.value.clone()),
                    )])
                }
                _ => resolve_constructor_type(state, data_type, return_type, inner),
            },
            _ => resolve_constructor_type(state, data_type, return_type, inner),
        },
        ConstructorType::Applied(left, right) => {
            let mut fields = resolve_constructor_type(state, data_type, return_type, left)?;
            fields.extend(resolve_constructor_type(state, data_type, return_type, right)?);
            Ok(fields)
        }
    }
}

/// Right-fold a non-empty list of types into a curried function type.
fn fold_lambda(types: &[Type]) -> Type {
    let (last, rest) = types
        .split_last()
        .expect("annotations always carry at least one type");
    rest.iter()
        .rev()
        .fold(last.clone(), |acc, ty| Type::lambda(ty.clone(), acc))
}

/// Check one function declaration against its annotation.
///
/// Used for top-level functions and let-bound ones alike; `scope` is
/// whatever the declaration can see.
pub fn check_declaration(
    state: &CompileState,
    scope: &Scope,
    declaration: &Declaration,
) -> Result<TypedDeclaration, CompileError> {
    let annotation = declaration.annotation.as_ref().ok_or_else(|| {
        CompileError::declaration(
            "For now, annotations are required.",
            declaration.position.clone(),
        )
    })?;

    let mut annotation_types = Vec::with_capacity(annotation.types.len());
    for annotation_type in &annotation.types {
        annotation_types.push(resolve_annotation_type(state, annotation, annotation_type)?);
    }

    if annotation_types.len() <= declaration.args.len() {
        return Err(CompileError::declaration(
            format!(
                "{} has {} arguments, but its annotation only describes {} types",
                declaration.name.value,
                declaration.args.len(),
                annotation_types.len()
            ),
            declaration.position.clone(),
        ));
    }

    let (argument_types, return_types) = annotation_types.split_at(declaration.args.len());
    let expected_return_type = fold_lambda(return_types);

    let mut typed_args = Vec::with_capacity(declaration.args.len());
    for (expected, arg) in argument_types.iter().zip(&declaration.args) {
        typed_args.push(check_argument(state, expected, arg)?);
    }

    let function_type = fold_lambda(&annotation_types);

    // Provisional self-declaration so recursive references resolve while the
    // body is checked.
    let provisional = TypedDeclaration {
        name: declaration.name.value.clone(),
        ty: function_type.clone(),
        args: typed_args.clone(),
        body: TypedExpression::Number(0),
    };

    let mut body_scope = scope.extend(provisional);
    for arg in &typed_args {
        body_scope = body_scope.extend_all(declarations_from_argument(arg));
    }

    let body = infer_expression(state, &body_scope, &declaration.body)?;
    let body_type = body.ty();
    if !type_eq(&expected_return_type, &body_type) {
        return Err(CompileError::declaration(
            format!(
                "Expected {} to return type {}, but instead got type {}",
                declaration.name.value, expected_return_type, body_type
            ),
            declaration.body.position().clone(),
        ));
    }

    Ok(TypedDeclaration {
        name: declaration.name.value.clone(),
        ty: function_type,
        args: typed_args,
        body,
    })
}

/// Resolve one element of an annotation's arrow chain into a type.
fn resolve_annotation_type(
    state: &CompileState,
    annotation: &Annotation,
    ty: &AnnotationType,
) -> Result<Type, CompileError> {
    match ty {
        AnnotationType::Concrete(ident) => {
            if starts_lowercase(&ident.value) {
                return Ok(Type::Generic(ident.value.clone()));
            }
            match state.lookup_type(&ident.value) {
                Some(known) => Ok(known.clone()),
                None => Err(CompileError::declaration(
                    format!(
                        "Unknown type \"{}\" in the annotation of {}",
                        ident.value, annotation.name.value
                    ),
                    ident.position.clone(),
                )),
            }
        }
        AnnotationType::Parenthesized(types) => {
            let resolved = types
                .iter()
                .map(|t| resolve_annotation_type(state, annotation, t))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(fold_lambda(&resolved))
        }
        AnnotationType::TypeApplication(f, x) => {
            let head = resolve_annotation_type(state, annotation, f)?;
            let arg = resolve_annotation_type(state, annotation, x)?;
            match head {
                Type::TL(_) | Type::Applied(_, _) => Ok(Type::applied(head, arg)),
                other => Err(CompileError::declaration(
                    format!("{} cannot be applied to type arguments", other),
                    f.position(),
                )),
            }
        }
    }
}

/// Infer an argument pattern against the type it is matched with.
fn check_argument(
    state: &CompileState,
    expected: &Type,
    argument: &Argument,
) -> Result<TypedArgument, CompileError> {
    match argument {
        Argument::Identifier(ident) => Ok(TypedArgument::Identifier(
            expected.clone(),
            ident.value.clone(),
        )),
        Argument::NumberLiteral(number) => {
            if *expected == Type::Num {
                Ok(TypedArgument::NumberLiteral(number.value))
            } else {
                Err(CompileError::expression(
                    format!("case branch is type Int when value is type {}", expected),
                    number.position.clone(),
                ))
            }
        }
        Argument::Deconstruction(deconstruction) => {
            let head = expected.head().ok_or_else(|| {
                CompileError::expression(
                    format!("cannot deconstruct a value of type {}", expected),
                    deconstruction.position.clone(),
                )
            })?;

            let constructor = state
                .constructors_for(head)
                .and_then(|constructors| {
                    constructors
                        .iter()
                        .find(|c| c.name == deconstruction.constructor.value)
                })
                .ok_or_else(|| {
                    CompileError::expression(
                        format!(
                            "no constructor named \"{}\" for {} in scope.",
                            deconstruction.constructor.value, expected
                        ),
                        deconstruction.position.clone(),
                    )
                })?;

            if constructor.fields.len() != deconstruction.args.len() {
                return Err(CompileError::expression(
                    format!(
                        "constructor {} expects {} arguments, but the pattern binds {}",
                        constructor.name,
                        constructor.fields.len(),
                        deconstruction.args.len()
                    ),
                    deconstruction.position.clone(),
                ));
            }

            let mut typed_args = Vec::with_capacity(deconstruction.args.len());
            for (field, sub) in constructor.fields.iter().zip(&deconstruction.args) {
                typed_args.push(check_argument(state, field, sub)?);
            }

            Ok(TypedArgument::Deconstruction(
                constructor.name.clone(),
                constructor.tag,
                typed_args,
            ))
        }
    }
}

/// The declarations an already-typed pattern binds into the scope of the
/// body or branch it guards.
fn declarations_from_argument(argument: &TypedArgument) -> Vec<TypedDeclaration> {
    match argument {
        TypedArgument::Identifier(ty, name) => vec![TypedDeclaration {
            name: name.clone(),
            ty: ty.clone(),
            args: Vec::new(),
            body: TypedExpression::Identifier(ty.clone(), name.clone()),
        }],
        TypedArgument::NumberLiteral(_) => Vec::new(),
        TypedArgument::Deconstruction(_, _, sub_args) => sub_args
            .iter()
            .flat_map(declarations_from_argument)
            .collect(),
    }
}

/// Infer the typed shape of an expression.
fn infer_expression(
    state: &CompileState,
    scope: &Scope,
    expression: &Expression,
) -> Result<TypedExpression, CompileError> {
    match expression {
        Expression::Number(number) => Ok(TypedExpression::Number(number.value)),
        Expression::Float(float) => Ok(TypedExpression::Float(float.value)),
        Expression::String(string) => Ok(TypedExpression::String(string.value.clone())),
        Expression::BetweenParens(parens) => infer_expression(state, scope, &parens.inner),
        Expression::Identifier(ident) => match scope.lookup(&ident.value) {
            Some(declaration) => Ok(TypedExpression::Identifier(
                declaration.ty.clone(),
                ident.value.clone(),
            )),
            None => Err(CompileError::expression(
                format!("It's not clear what \"{}\" refers to", ident.value),
                ident.position.clone(),
            )),
        },
        Expression::Infix(infix) => infer_infix(state, scope, infix),
        Expression::Apply(apply) => infer_apply(state, scope, apply),
        Expression::Case(case) => infer_case(state, scope, case),
        Expression::Let(le) => infer_let(state, scope, le),
    }
}

fn infer_infix(
    state: &CompileState,
    scope: &Scope,
    infix: &Infix,
) -> Result<TypedExpression, CompileError> {
    let left = infer_expression(state, scope, &infix.left)?;
    let right = infer_expression(state, scope, &infix.right)?;
    let left_type = left.ty();
    let right_type = right.ty();

    let result_type = match (infix.op, &left_type, &right_type) {
        (OperatorExpr::StringAdd, Type::Str, Type::Str) => Some(Type::Str),
        (OperatorExpr::StringAdd, _, _) => None,
        (_, Type::Num, Type::Num) => Some(Type::Num),
        (_, Type::Float, Type::Float) => Some(Type::Float),
        _ => None,
    };

    match result_type {
        Some(ty) => Ok(TypedExpression::Infix(
            ty,
            infix.op,
            Box::new(left),
            Box::new(right),
        )),
        None => Err(CompileError::expression(
            format!(
                "No function exists with type {} {} {}",
                left_type,
                infix.op.symbol(),
                right_type
            ),
            infix.position.clone(),
        )),
    }
}

fn infer_apply(
    state: &CompileState,
    scope: &Scope,
    apply: &Apply,
) -> Result<TypedExpression, CompileError> {
    let function = infer_expression(state, scope, &apply.func)?;
    let argument = infer_expression(state, scope, &apply.arg)?;
    let argument_type = argument.ty();

    match function.ty() {
        Type::Lambda(parameter, result) => match type_constraints(&parameter, &argument_type) {
            Some(constraints) => Ok(TypedExpression::Apply(
                replace_generics(&constraints, &result),
                Box::new(function),
                Box::new(argument),
            )),
            None => Err(CompileError::expression(
                format!(
                    "Function expected argument of type {}, but instead got argument of type {}",
                    parameter, argument_type
                ),
                apply.position.clone(),
            )),
        },
        other => Err(CompileError::expression(
            format!(
                "Tried to apply a value of type {} to a value of type {}",
                other, argument_type
            ),
            apply.position.clone(),
        )),
    }
}

/// Branch types are deemed to agree when every ordered pair fits in one
/// direction or the other. This is not transitive closure; it mirrors the
/// pairwise check the language has always performed.
fn all_branches_agree(types: &[Type]) -> bool {
    types
        .iter()
        .all(|a| types.iter().all(|b| type_eq(a, b) || type_eq(b, a)))
}

fn infer_case(
    state: &CompileState,
    scope: &Scope,
    case: &Case,
) -> Result<TypedExpression, CompileError> {
    let value = infer_expression(state, scope, &case.value)?;
    let value_type = value.ty();

    let mut branches = Vec::with_capacity(case.branches.len());
    for (pattern, body) in &case.branches {
        let typed_pattern = check_argument(state, &value_type, pattern)?;
        let branch_scope = scope.extend_all(declarations_from_argument(&typed_pattern));
        let typed_body = infer_expression(state, &branch_scope, body)?;
        branches.push((typed_pattern, typed_body));
    }

    let branch_types: Vec<Type> = branches.iter().map(|(_, body)| body.ty()).collect();
    if !all_branches_agree(&branch_types) {
        let printed = branch_types
            .iter()
            .map(Type::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        return Err(CompileError::expression(
            format!("Case expression has multiple return types: {}", printed),
            case.position.clone(),
        ));
    }

    let case_type = branch_types
        .first()
        .cloned()
        .expect("case expressions always have at least one branch");
    Ok(TypedExpression::Case(case_type, Box::new(value), branches))
}

fn infer_let(
    state: &CompileState,
    scope: &Scope,
    le: &Let,
) -> Result<TypedExpression, CompileError> {
    let mut let_scope = scope.clone();
    let mut declarations = Vec::with_capacity(le.declarations.len());
    for declaration in &le.declarations {
        let typed = check_declaration(state, &let_scope, declaration)?;
        let_scope = let_scope.extend(typed.clone());
        declarations.push(typed);
    }

    let body = infer_expression(state, &let_scope, &le.body)?;
    Ok(TypedExpression::Let(declarations, Box::new(body)))
}
