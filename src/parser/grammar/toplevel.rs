//! Top-level parsers for the Tree language: data-type declarations,
//! annotations, and function equations.

use crate::ast::{Annotation, AnnotationType, Constructor, ConstructorType, DataType, Declaration};
use crate::lexer::Token;

use crate::parser::combinators::{
    expect_arrow, expect_data, expect_double_colon, expect_equals, expect_lparen, expect_pipe,
    expect_rparen, many, BoxedParser,
};
use crate::parser::state::{ParseError, ParseResult, ParseState, Parser};

use super::expression::expression;
use super::literal::ident;
use super::pattern::argument_atom;

/// Check whether the upcoming tokens begin a declaration (`ident =`) or an
/// annotation (`ident ::`) instead of more constructor fields.
fn at_declaration_start(state: &mut ParseState) -> bool {
    let pos = state.position();
    let result = ident().parse(state).is_ok()
        && matches!(
            state.peek(),
            Some(Token::Equals(_)) | Some(Token::DoubleColon(_))
        );
    state.restore(pos);
    result
}

/// constructor_type_atom := ident | "(" constructor_type ")"
fn constructor_type_atom(state: &mut ParseState) -> ParseResult<ConstructorType> {
    let pos = state.position();
    if expect_lparen().parse(state).is_ok() {
        let inner = constructor_type(state)?;
        expect_rparen().parse(state)?;
        return Ok(ConstructorType::Parenthesized(Box::new(inner)));
    }
    state.restore(pos);

    Ok(ConstructorType::Concrete(
        ident().label("type").parse(state)?,
    ))
}

/// constructor_type := constructor_type_atom+   (left-associated)
fn constructor_type(state: &mut ParseState) -> ParseResult<ConstructorType> {
    if at_declaration_start(state) {
        return Err(ParseError::new("expected constructor field"));
    }
    let mut ty = constructor_type_atom(state)?;
    loop {
        if at_declaration_start(state) {
            break;
        }
        let pos = state.position();
        match constructor_type_atom(state) {
            Ok(next) => ty = ConstructorType::Applied(Box::new(ty), Box::new(next)),
            Err(_) => {
                state.restore(pos);
                break;
            }
        }
    }
    Ok(ty)
}

/// constructor := ident constructor_type?
fn constructor(state: &mut ParseState) -> ParseResult<Constructor> {
    let name = ident().label("constructor name").parse(state)?;
    let pos = state.position();
    let ty = match constructor_type(state) {
        Ok(ty) => Some(ty),
        Err(_) => {
            state.restore(pos);
            None
        }
    };
    let position = name.position.clone();
    Ok(Constructor { name, ty, position })
}

/// data_type := "data" ident ident* "=" constructor ("|" constructor)*
pub fn data_type() -> BoxedParser<DataType> {
    BoxedParser::new(move |state: &mut ParseState| {
        let start = expect_data().parse(state)?.pos();
        let name = ident().label("data type name").parse(state)?;
        let generics = many(ident()).parse(state)?;
        expect_equals().parse(state)?;

        let mut constructors = vec![constructor(state)?];
        loop {
            let pos = state.position();
            if expect_pipe().parse(state).is_ok() {
                constructors.push(constructor(state)?);
            } else {
                state.restore(pos);
                break;
            }
        }

        let end = constructors
            .last()
            .map(|c| c.position.clone())
            .unwrap_or_else(|| start.clone());
        Ok(DataType {
            name,
            generics,
            constructors,
            position: start.merge(&end),
        })
    })
}

/// annotation_type_atom := ident | "(" annotation_type ("->" annotation_type)* ")"
fn annotation_type_atom(state: &mut ParseState, stop: &str) -> ParseResult<AnnotationType> {
    let pos = state.position();
    if expect_lparen().parse(state).is_ok() {
        let mut types = vec![annotation_type(state, stop)?];
        loop {
            let p = state.position();
            if expect_arrow().parse(state).is_ok() {
                types.push(annotation_type(state, stop)?);
            } else {
                state.restore(p);
                break;
            }
        }
        expect_rparen().parse(state)?;
        return Ok(AnnotationType::Parenthesized(types));
    }
    state.restore(pos);

    Ok(AnnotationType::Concrete(
        ident().label("type").parse(state)?,
    ))
}

/// annotation_type := annotation_type_atom+   (left-associated application)
///
/// `stop` is the annotated function's name: the annotation ends where its
/// equation begins.
fn annotation_type(state: &mut ParseState, stop: &str) -> ParseResult<AnnotationType> {
    let mut ty = annotation_type_atom(state, stop)?;
    loop {
        if let Some(Token::Ident(id)) = state.peek() {
            if id.value == stop {
                break;
            }
        }
        let pos = state.position();
        match annotation_type_atom(state, stop) {
            Ok(next) => ty = AnnotationType::TypeApplication(Box::new(ty), Box::new(next)),
            Err(_) => {
                state.restore(pos);
                break;
            }
        }
    }
    Ok(ty)
}

/// annotation := ident "::" annotation_type ("->" annotation_type)*
fn annotation(state: &mut ParseState) -> ParseResult<Annotation> {
    let name = ident().parse(state)?;
    expect_double_colon().parse(state)?;
    let stop = name.value.clone();

    let mut types = vec![annotation_type(state, &stop)?];
    loop {
        let pos = state.position();
        if expect_arrow().parse(state).is_ok() {
            types.push(annotation_type(state, &stop)?);
        } else {
            state.restore(pos);
            break;
        }
    }

    let end = types
        .last()
        .map(AnnotationType::position)
        .unwrap_or_else(|| name.position.clone());
    let position = name.position.merge(&end);
    Ok(Annotation {
        name,
        types,
        position,
    })
}

/// declaration := annotation? ident argument_atom* "=" expression
pub fn declaration() -> BoxedParser<Declaration> {
    BoxedParser::new(move |state: &mut ParseState| {
        let pos = state.position();
        let parsed_annotation = match annotation(state) {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                state.restore(pos);
                None
            }
        };

        let name = ident().label("function name").parse(state)?;
        let args = many(argument_atom()).parse(state)?;
        expect_equals().parse(state)?;
        let body = expression().parse(state)?;

        let start = parsed_annotation
            .as_ref()
            .map(|a| a.position.clone())
            .unwrap_or_else(|| name.position.clone());
        let position = start.merge(body.position());
        Ok(Declaration {
            annotation: parsed_annotation,
            name,
            args,
            body,
            position,
        })
    })
}
