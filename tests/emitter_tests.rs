use larch::emit::emit_module;
use larch::lexer::Token;
use larch::parser::{parse, ParseState};
use larch::types::check_module;

fn compile(source: &str) -> String {
    let tokens = Token::lex(source).expect("lexing failed");
    let mut state = ParseState::new(tokens);
    let module = match parse(&mut state) {
        Ok(module) => module,
        Err(error) => panic!("parsing failed: {}", error),
    };
    let typed = match check_module(&module) {
        Ok(typed) => typed,
        Err(errors) => panic!("checking failed: {}", errors[0]),
    };
    emit_module(&typed)
}

#[test]
fn emit_constant_module_exactly() {
    let wat = compile("main :: Int\nmain = 42");
    assert_eq!(
        wat,
        "(module\n  (export \"main\" (func $main))\n  (func $main (result i32)\n    (i32.const 42))\n)\n"
    );
}

#[test]
fn emit_function_with_parameters() {
    let wat = compile("add :: Int -> Int -> Int\nadd x y = x + y");
    assert!(wat.contains("(export \"add\" (func $add))"));
    assert!(wat.contains("(func $add (param $x i32) (param $y i32) (result i32)"));
    assert!(wat.contains("(i32.add (get_local $x) (get_local $y))"));
}

#[test]
fn emit_all_integer_operators() {
    let wat = compile(
        "a :: Int -> Int\na n = n + 1\n\n\
         b :: Int -> Int\nb n = n - 1\n\n\
         c :: Int -> Int\nc n = n * 2\n\n\
         d :: Int -> Int\nd n = n / 2",
    );
    assert!(wat.contains("(i32.add (get_local $n) (i32.const 1))"));
    assert!(wat.contains("(i32.sub (get_local $n) (i32.const 1))"));
    assert!(wat.contains("(i32.mul (get_local $n) (i32.const 2))"));
    assert!(wat.contains("(i32.div_s (get_local $n) (i32.const 2))"));
}

#[test]
fn emit_float_operators() {
    let wat = compile("half :: Float -> Float\nhalf x = x / 2.0");
    assert!(wat.contains("(f32.div (get_local $x) (f32.const 2))"));
}

#[test]
fn emit_call_to_other_declaration() {
    let wat = compile(
        "incr :: Int -> Int\nincr n = n + 1\n\nmain :: Int\nmain = incr 41",
    );
    assert!(wat.contains("(call $incr (i32.const 41))"));
}

#[test]
fn emit_curried_call_flattens_to_one_call() {
    let wat = compile(
        "add :: Int -> Int -> Int\nadd x y = x + y\n\nmain :: Int\nmain = add 1 2",
    );
    assert!(wat.contains("(call $add (i32.const 1) (i32.const 2))"));
}

#[test]
fn emit_case_as_nested_selects() {
    let wat = compile(
        "classify :: Int -> Int\n\
         classify n = case n of\n    0 -> 10\n    1 -> 20\n    _ -> 30",
    );
    assert!(wat.contains(
        "(select (i32.const 10) \
         (select (i32.const 20) (i32.const 30) \
         (i32.eq (get_local $n) (i32.const 1))) \
         (i32.eq (get_local $n) (i32.const 0)))"
    ));
}

#[test]
fn emit_let_as_locals() {
    let wat = compile(
        "main :: Int\nmain = let\n    x :: Int\n    x = 7\nin x + 1",
    );
    assert!(wat.contains("(local $x i32)"));
    assert!(wat.contains("(set_local $x (i32.const 7))"));
    assert!(wat.contains("(i32.add (get_local $x) (i32.const 1))"));
}

#[test]
fn emit_constructors_as_tagged_functions() {
    let wat = compile("data Maybe a = Nothing | Just a");
    assert!(wat.contains("(export \"Nothing\" (func $Nothing))"));
    assert!(wat.contains("(func $Nothing (result i32)\n    (i32.const 0))"));
    assert!(wat.contains("(export \"Just\" (func $Just))"));
    assert!(wat.contains("(func $Just (param $a i32) (result i32)\n    (i32.const 1))"));
}

#[test]
fn emit_deconstruction_branches_compare_tags() {
    let wat = compile(
        "data Maybe a = Nothing | Just a\n\n\
         toInt :: Maybe Int -> Int\n\
         toInt m = case m of\n    Just x -> x\n    Nothing -> 0",
    );
    // Just has tag 1; its branch guards the select.
    assert!(wat.contains("(i32.eq (get_local $m) (i32.const 1))"));
    assert!(wat.contains("(local $x i32)"));
}
