use larch::lexer::Token;

#[test]
fn lex_keywords() {
    let tokens = Token::lex("case of let in data").expect("lexing failed");
    assert_eq!(tokens.len(), 5);
    assert!(matches!(tokens[0], Token::Case(_)));
    assert!(matches!(tokens[1], Token::Of(_)));
    assert!(matches!(tokens[2], Token::Let(_)));
    assert!(matches!(tokens[3], Token::In(_)));
    assert!(matches!(tokens[4], Token::Data(_)));
}

#[test]
fn lex_identifiers_with_keyword_prefixes() {
    let tokens = Token::lex("cases lettuce dataset indent").expect("lexing failed");
    assert_eq!(tokens.len(), 4);
    for token in &tokens {
        assert!(matches!(token, Token::Ident(_)), "got {:?}", token);
    }
}

#[test]
fn lex_punctuation() {
    let tokens = Token::lex("= -> :: | ( )").expect("lexing failed");
    assert_eq!(tokens.len(), 6);
    assert!(matches!(tokens[0], Token::Equals(_)));
    assert!(matches!(tokens[1], Token::Arrow(_)));
    assert!(matches!(tokens[2], Token::DoubleColon(_)));
    assert!(matches!(tokens[3], Token::Pipe(_)));
    assert!(matches!(tokens[4], Token::LParen(_)));
    assert!(matches!(tokens[5], Token::RParen(_)));
}

#[test]
fn lex_operators() {
    let tokens = Token::lex("+ - * / ++").expect("lexing failed");
    assert_eq!(tokens.len(), 5);
    assert!(matches!(tokens[0], Token::Plus(_)));
    assert!(matches!(tokens[1], Token::Minus(_)));
    assert!(matches!(tokens[2], Token::Star(_)));
    assert!(matches!(tokens[3], Token::Slash(_)));
    assert!(matches!(tokens[4], Token::DoublePlus(_)));
}

#[test]
fn lex_number_literals() {
    let tokens = Token::lex("42 3.14").expect("lexing failed");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::Integer(inner) => assert_eq!(inner.value, "42"),
        other => panic!("expected integer, got {:?}", other),
    }
    match &tokens[1] {
        Token::FloatLiteral(inner) => assert_eq!(inner.value, "3.14"),
        other => panic!("expected float, got {:?}", other),
    }
}

#[test]
fn lex_string_literal() {
    let tokens = Token::lex("\"hello world\"").expect("lexing failed");
    assert_eq!(tokens.len(), 1);
    match &tokens[0] {
        Token::StringLiteral(inner) => assert_eq!(inner.value, "\"hello world\""),
        other => panic!("expected string, got {:?}", other),
    }
}

#[test]
fn lex_small_program() {
    let source = "id :: a -> a\nid x = x";
    let tokens = Token::lex(source).expect("lexing failed");
    // id :: a -> a id x = x
    assert_eq!(tokens.len(), 9);
    assert!(matches!(tokens[0], Token::Ident(_)));
    assert!(matches!(tokens[1], Token::DoubleColon(_)));
    assert!(matches!(tokens[3], Token::Arrow(_)));
    assert!(matches!(tokens[7], Token::Equals(_)));
}
