use larch::ast::expression::{Expression, OperatorExpr};
use larch::ast::pattern::Argument;
use larch::ast::{AnnotationType, ConstructorType, Module, TopLevel};
use larch::lexer::Token;
use larch::parser::{parse, ParseState};

fn parse_module(input: &str) -> Module {
    let tokens = Token::lex(input).expect("lexing failed");
    let mut state = ParseState::new(tokens);
    match parse(&mut state) {
        Ok(module) => module,
        Err(error) => panic!("parsing failed: {}", error),
    }
}

#[test]
fn parse_data_type() {
    let module = parse_module("data Maybe a = Nothing | Just a");
    assert_eq!(module.top_levels.len(), 1);

    let data_type = match &module.top_levels[0] {
        TopLevel::DataType(data_type) => data_type,
        other => panic!("expected data type, got {:?}", other),
    };
    assert_eq!(data_type.name.value, "Maybe");
    assert_eq!(data_type.generics.len(), 1);
    assert_eq!(data_type.generics[0].value, "a");
    assert_eq!(data_type.constructors.len(), 2);

    assert_eq!(data_type.constructors[0].name.value, "Nothing");
    assert!(data_type.constructors[0].ty.is_none());

    assert_eq!(data_type.constructors[1].name.value, "Just");
    match &data_type.constructors[1].ty {
        Some(ConstructorType::Concrete(ident)) => assert_eq!(ident.value, "a"),
        other => panic!("expected concrete field, got {:?}", other),
    }
}

#[test]
fn parse_data_type_with_recursive_field() {
    let module = parse_module("data List a = Cons a (List a) | Nil");
    let data_type = match &module.top_levels[0] {
        TopLevel::DataType(data_type) => data_type,
        other => panic!("expected data type, got {:?}", other),
    };
    match &data_type.constructors[0].ty {
        Some(ConstructorType::Applied(left, right)) => {
            assert!(matches!(left.as_ref(), ConstructorType::Concrete(_)));
            assert!(matches!(right.as_ref(), ConstructorType::Parenthesized(_)));
        }
        other => panic!("expected applied field list, got {:?}", other),
    }
}

#[test]
fn parse_annotated_function() {
    let module = parse_module("id :: a -> a\nid x = x");
    assert_eq!(module.top_levels.len(), 1);

    let declaration = match &module.top_levels[0] {
        TopLevel::Function(declaration) => declaration,
        other => panic!("expected function, got {:?}", other),
    };
    assert_eq!(declaration.name.value, "id");

    let annotation = declaration.annotation.as_ref().expect("missing annotation");
    assert_eq!(annotation.name.value, "id");
    assert_eq!(annotation.types.len(), 2);

    assert_eq!(declaration.args.len(), 1);
    assert!(matches!(&declaration.args[0], Argument::Identifier(i) if i.value == "x"));
    assert!(matches!(&declaration.body, Expression::Identifier(i) if i.value == "x"));
}

#[test]
fn parse_annotation_with_type_application() {
    let module = parse_module("map :: (a -> b) -> Result e a -> Result e b\nmap f r = r");
    let declaration = match &module.top_levels[0] {
        TopLevel::Function(declaration) => declaration,
        other => panic!("expected function, got {:?}", other),
    };
    let annotation = declaration.annotation.as_ref().expect("missing annotation");
    assert_eq!(annotation.types.len(), 3);

    match &annotation.types[0] {
        AnnotationType::Parenthesized(types) => assert_eq!(types.len(), 2),
        other => panic!("expected parenthesized arrow chain, got {:?}", other),
    }
    match &annotation.types[1] {
        AnnotationType::TypeApplication(left, _) => {
            assert!(matches!(left.as_ref(), AnnotationType::TypeApplication(_, _)));
        }
        other => panic!("expected left-associated application, got {:?}", other),
    }
}

#[test]
fn parse_application_is_left_associative() {
    let module = parse_module("main :: Int\nmain = f x y");
    let declaration = match &module.top_levels[0] {
        TopLevel::Function(declaration) => declaration,
        other => panic!("expected function, got {:?}", other),
    };
    // f x y == Apply(Apply(f, x), y)
    let outer = match &declaration.body {
        Expression::Apply(apply) => apply,
        other => panic!("expected application, got {:?}", other),
    };
    assert!(matches!(outer.arg.as_ref(), Expression::Identifier(i) if i.value == "y"));
    let inner = match outer.func.as_ref() {
        Expression::Apply(apply) => apply,
        other => panic!("expected nested application, got {:?}", other),
    };
    assert!(matches!(inner.func.as_ref(), Expression::Identifier(i) if i.value == "f"));
    assert!(matches!(inner.arg.as_ref(), Expression::Identifier(i) if i.value == "x"));
}

#[test]
fn parse_infix_is_flat_and_right_associative() {
    let module = parse_module("main :: Int\nmain = 1 + 2 * 3");
    let declaration = match &module.top_levels[0] {
        TopLevel::Function(declaration) => declaration,
        other => panic!("expected function, got {:?}", other),
    };
    // Flat precedence: 1 + (2 * 3) purely by right recursion.
    let outer = match &declaration.body {
        Expression::Infix(infix) => infix,
        other => panic!("expected infix, got {:?}", other),
    };
    assert_eq!(outer.op, OperatorExpr::Add);
    let right = match outer.right.as_ref() {
        Expression::Infix(infix) => infix,
        other => panic!("expected nested infix, got {:?}", other),
    };
    assert_eq!(right.op, OperatorExpr::Multiply);
}

#[test]
fn parse_string_concat_operator() {
    let module = parse_module("main :: String\nmain = \"a\" ++ \"b\"");
    let declaration = match &module.top_levels[0] {
        TopLevel::Function(declaration) => declaration,
        other => panic!("expected function, got {:?}", other),
    };
    match &declaration.body {
        Expression::Infix(infix) => assert_eq!(infix.op, OperatorExpr::StringAdd),
        other => panic!("expected infix, got {:?}", other),
    }
}

#[test]
fn parse_case_with_literal_and_binder_patterns() {
    let module = parse_module("f :: Int -> Int\nf n = case n of\n    0 -> 1\n    _ -> n");
    let declaration = match &module.top_levels[0] {
        TopLevel::Function(declaration) => declaration,
        other => panic!("expected function, got {:?}", other),
    };
    let case = match &declaration.body {
        Expression::Case(case) => case,
        other => panic!("expected case, got {:?}", other),
    };
    assert_eq!(case.branches.len(), 2);
    assert!(matches!(&case.branches[0].0, Argument::NumberLiteral(n) if n.value == 0));
    assert!(matches!(&case.branches[1].0, Argument::Identifier(i) if i.value == "_"));
}

#[test]
fn parse_case_with_constructor_patterns() {
    let module = parse_module(
        "f :: Maybe Int -> Int\nf m = case m of\n    Just x -> x\n    Nothing -> 0",
    );
    let declaration = match &module.top_levels[0] {
        TopLevel::Function(declaration) => declaration,
        other => panic!("expected function, got {:?}", other),
    };
    let case = match &declaration.body {
        Expression::Case(case) => case,
        other => panic!("expected case, got {:?}", other),
    };
    assert_eq!(case.branches.len(), 2);

    match &case.branches[0].0 {
        Argument::Deconstruction(deconstruction) => {
            assert_eq!(deconstruction.constructor.value, "Just");
            assert_eq!(deconstruction.args.len(), 1);
        }
        other => panic!("expected deconstruction, got {:?}", other),
    }
    match &case.branches[1].0 {
        Argument::Deconstruction(deconstruction) => {
            assert_eq!(deconstruction.constructor.value, "Nothing");
            assert!(deconstruction.args.is_empty());
        }
        other => panic!("expected deconstruction, got {:?}", other),
    }
}

#[test]
fn parse_deconstruction_argument_needs_parens() {
    let module = parse_module("f :: Maybe Int -> Int\nf (Just n) = n");
    let declaration = match &module.top_levels[0] {
        TopLevel::Function(declaration) => declaration,
        other => panic!("expected function, got {:?}", other),
    };
    assert_eq!(declaration.args.len(), 1);
    match &declaration.args[0] {
        Argument::Deconstruction(deconstruction) => {
            assert_eq!(deconstruction.constructor.value, "Just");
            assert_eq!(deconstruction.args.len(), 1);
        }
        other => panic!("expected deconstruction, got {:?}", other),
    }
}

#[test]
fn parse_let_block() {
    let module = parse_module("main :: Int\nmain = let x = 2 in x + 1");
    let declaration = match &module.top_levels[0] {
        TopLevel::Function(declaration) => declaration,
        other => panic!("expected function, got {:?}", other),
    };
    let le = match &declaration.body {
        Expression::Let(le) => le,
        other => panic!("expected let, got {:?}", other),
    };
    assert_eq!(le.declarations.len(), 1);
    assert_eq!(le.declarations[0].name.value, "x");
    assert!(matches!(le.body.as_ref(), Expression::Infix(_)));
}

#[test]
fn parse_parenthesized_expression() {
    let module = parse_module("main :: Int\nmain = (1 + 2) * 3");
    let declaration = match &module.top_levels[0] {
        TopLevel::Function(declaration) => declaration,
        other => panic!("expected function, got {:?}", other),
    };
    let infix = match &declaration.body {
        Expression::Infix(infix) => infix,
        other => panic!("expected infix, got {:?}", other),
    };
    assert_eq!(infix.op, OperatorExpr::Multiply);
    assert!(matches!(infix.left.as_ref(), Expression::BetweenParens(_)));
}

#[test]
fn parse_float_literal() {
    let module = parse_module("main :: Float\nmain = 3.14");
    let declaration = match &module.top_levels[0] {
        TopLevel::Function(declaration) => declaration,
        other => panic!("expected function, got {:?}", other),
    };
    match &declaration.body {
        Expression::Float(float) => assert!((float.value - 3.14).abs() < 1e-9),
        other => panic!("expected float, got {:?}", other),
    }
}

#[test]
fn parse_second_equation_becomes_new_declaration() {
    // Multi-equation definitions are not supported: the second equation
    // parses as its own (unannotated) declaration.
    let module = parse_module("f :: Int -> Int\nf 0 = 0\nf n = n");
    assert_eq!(module.top_levels.len(), 2);
    let second = match &module.top_levels[1] {
        TopLevel::Function(declaration) => declaration,
        other => panic!("expected function, got {:?}", other),
    };
    assert!(second.annotation.is_none());
}

#[test]
fn parse_error_reports_location() {
    let tokens = Token::lex("f :: Int ->").expect("lexing failed");
    let mut state = ParseState::new(tokens);
    let error = parse(&mut state).expect_err("should not parse");
    let message = format!("{}", error);
    assert!(message.contains("expected"), "got: {}", message);
}

#[test]
fn parse_several_top_levels() {
    let module = parse_module(
        "data Maybe a = Nothing | Just a\n\n\
         withDefault :: Int -> Maybe Int -> Int\n\
         withDefault fallback m = case m of\n    Just n -> n\n    Nothing -> fallback\n\n\
         main :: Int\n\
         main = withDefault 0 (Just 42)",
    );
    assert_eq!(module.top_levels.len(), 3);
    assert!(matches!(&module.top_levels[0], TopLevel::DataType(_)));
    assert!(matches!(&module.top_levels[1], TopLevel::Function(_)));
    assert!(matches!(&module.top_levels[2], TopLevel::Function(_)));
}
