//! # Compile State and Scopes
//!
//! [`CompileState`] is the single mutable record threaded across top-levels
//! by the driver: accumulated errors, the declared type lambdas in order of
//! appearance, the type map (seeded with the primitives), the typed
//! declarations in value scope, and the constructors of every data type.
//! It grows monotonically - errors and declarations append, nothing is
//! removed - and is consumed at end-of-module.
//!
//! [`Scope`] is the immutable view expression checking threads along:
//! a list of typed declarations extended clone-by-clone as argument
//! patterns, let bindings, and provisional declarations come into view.

use std::collections::HashMap;

use super::error::CompileError;
use super::ty::{Type, TypeLambda};
use crate::typed::{TypedConstructor, TypedDeclaration, TypedModule};

/// The compile state built up left-to-right over a module's top-levels.
pub struct CompileState {
    errors: Vec<CompileError>,
    type_lambdas: Vec<TypeLambda>,
    types: HashMap<String, Type>,
    declarations: Vec<TypedDeclaration>,
    constructors: HashMap<String, Vec<TypedConstructor>>,
}

impl CompileState {
    /// Create an empty compile state, seeded with the primitive types.
    pub fn new() -> Self {
        let mut types = HashMap::new();
        types.insert("Int".to_string(), Type::Num);
        types.insert("Float".to_string(), Type::Float);
        types.insert("String".to_string(), Type::Str);

        Self {
            errors: Vec::new(),
            type_lambdas: Vec::new(),
            types,
            declarations: Vec::new(),
            constructors: HashMap::new(),
        }
    }

    pub fn add_error(&mut self, error: CompileError) {
        self.errors.push(error);
    }

    /// Register a new data type's head in both the type-lambda list and the
    /// type map.
    pub fn declare_type_lambda(&mut self, name: &str) -> TypeLambda {
        let head = TypeLambda::new(name);
        self.type_lambdas.push(head.clone());
        self.types
            .insert(name.to_string(), Type::TL(head.clone()));
        head
    }

    pub fn lookup_type(&self, name: &str) -> Option<&Type> {
        self.types.get(name)
    }

    pub fn add_declaration(&mut self, declaration: TypedDeclaration) {
        self.declarations.push(declaration);
    }

    pub fn add_constructor(&mut self, head: &TypeLambda, constructor: TypedConstructor) {
        self.constructors
            .entry(head.name.clone())
            .or_default()
            .push(constructor);
    }

    pub fn constructors_for(&self, head: &TypeLambda) -> Option<&[TypedConstructor]> {
        self.constructors.get(&head.name).map(Vec::as_slice)
    }

    /// The value-level scope of everything declared so far.
    pub fn scope(&self) -> Scope {
        Scope {
            declarations: self.declarations.clone(),
        }
    }

    /// Consume the state: a non-empty error list yields `Err`, otherwise the
    /// typed module of accumulated declarations.
    pub fn into_result(self) -> Result<TypedModule, Vec<CompileError>> {
        if self.errors.is_empty() {
            Ok(TypedModule {
                declarations: self.declarations,
            })
        } else {
            Err(self.errors)
        }
    }
}

impl Default for CompileState {
    fn default() -> Self {
        Self::new()
    }
}

/// An immutable list of typed declarations visible to an expression.
///
/// Later entries win on lookup, so bindings introduced by argument patterns
/// and let blocks take precedence over earlier declarations.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    declarations: Vec<TypedDeclaration>,
}

impl Scope {
    pub fn lookup(&self, name: &str) -> Option<&TypedDeclaration> {
        self.declarations.iter().rev().find(|d| d.name == name)
    }

    /// Extend the scope with one more declaration, returning the new scope.
    pub fn extend(&self, declaration: TypedDeclaration) -> Scope {
        let mut declarations = self.declarations.clone();
        declarations.push(declaration);
        Scope { declarations }
    }

    /// Extend the scope with several declarations at once.
    pub fn extend_all(&self, new: Vec<TypedDeclaration>) -> Scope {
        let mut declarations = self.declarations.clone();
        declarations.extend(new);
        Scope { declarations }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typed::TypedExpression;

    fn decl(name: &str, ty: Type) -> TypedDeclaration {
        TypedDeclaration {
            name: name.to_string(),
            ty: ty.clone(),
            args: vec![],
            body: TypedExpression::Identifier(ty, name.to_string()),
        }
    }

    #[test]
    fn test_state_seeds_primitives() {
        let state = CompileState::new();
        assert_eq!(state.lookup_type("Int"), Some(&Type::Num));
        assert_eq!(state.lookup_type("Float"), Some(&Type::Float));
        assert_eq!(state.lookup_type("String"), Some(&Type::Str));
        assert_eq!(state.lookup_type("Maybe"), None);
    }

    #[test]
    fn test_declare_type_lambda_registers_both_ways() {
        let mut state = CompileState::new();
        let head = state.declare_type_lambda("Maybe");
        assert_eq!(head, TypeLambda::new("Maybe"));
        assert_eq!(
            state.lookup_type("Maybe"),
            Some(&Type::type_lambda("Maybe"))
        );
    }

    #[test]
    fn test_empty_state_yields_empty_module() {
        let state = CompileState::new();
        let module = state.into_result().unwrap();
        assert!(module.declarations.is_empty());
    }

    #[test]
    fn test_errors_fail_the_module() {
        let mut state = CompileState::new();
        state.add_error(CompileError::declaration(
            "For now, annotations are required.",
            lachs::Span::default(),
        ));
        let errors = state.into_result().unwrap_err();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_scope_later_bindings_win() {
        let scope = Scope::default()
            .extend(decl("x", Type::Num))
            .extend(decl("x", Type::Str));
        assert_eq!(scope.lookup("x").unwrap().ty, Type::Str);
        assert!(scope.lookup("y").is_none());
    }
}
