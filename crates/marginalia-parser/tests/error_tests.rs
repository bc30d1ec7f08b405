//! Malformed comments and schema violations
//!
//! Any failure aborts the whole comment body.

mod common;

use common::{nested, parser_with, scalar};
use marginalia_ast::{NodeType, ScalarKind};
use marginalia_parser::{AnnotationParser, AttributeFault, ParseError, ParserConfig, RegistryError, ValueError};

fn parse_err(types: &[std::sync::Arc<NodeType>], doc: &str) -> ParseError {
    match parser_with(types).parse(doc) {
        Ok(annotations) => panic!("expected an error, parsed {annotations:?}"),
        Err(err) => err,
    }
}

// === Registry ===

#[test]
fn test_duplicate_registration() {
    let mut parser = AnnotationParser::new();
    parser.register(nested()).unwrap();
    assert_eq!(
        parser.register(nested()).unwrap_err(),
        RegistryError::DuplicateNode { name: "nested".to_string() }
    );
}

#[test]
fn test_empty_registry() {
    let err = AnnotationParser::new().parse("/** @nested (name = x) */").unwrap_err();
    assert_eq!(err, ParseError::EmptyRegistry);
    assert_eq!(err.code(), "E-PARSE-001");
    assert_eq!(err.span(), None);
}

// === Syntax ===

#[test]
fn test_unexpected_closing_brace() {
    let doc = "/**\n * @nested (}\n */";
    let err = parse_err(&[nested()], doc);
    match &err {
        ParseError::Syntax { found, span, .. } => {
            assert_eq!(found, "'}'");
            assert_eq!(&doc[span.start..span.end], "}");
        }
        other => panic!("expected syntax error, got {other:?}"),
    }
    assert_eq!(err.code(), "E-PARSE-002");
}

#[test]
fn test_missing_value_at_end() {
    let err = parse_err(&[nested()], "/** @nested (name= */");
    match err {
        ParseError::Syntax { found, .. } => assert_eq!(found, "end of string"),
        other => panic!("expected syntax error, got {other:?}"),
    }
}

#[test]
fn test_missing_value_before_close() {
    let err = parse_err(&[nested()], "/** @nested (name=) */");
    assert!(matches!(err, ParseError::Syntax { ref found, .. } if found == "')'"), "{err:?}");
}

#[test]
fn test_unclosed_array() {
    let err = parse_err(&[nested()], "/** @nested (mm={) */");
    assert!(matches!(err, ParseError::Syntax { .. }), "{err:?}");
}

#[test]
fn test_unclosed_attribute_list() {
    let err = parse_err(&[scalar()], "/** @scalar (integer = 1 */");
    assert!(matches!(err, ParseError::Syntax { ref found, .. } if found == "end of string"), "{err:?}");
}

#[test]
fn test_nested_node_requires_parentheses() {
    let err = parse_err(&[nested()], "/** @nested (scalar = @scalar) */");
    assert!(matches!(err, ParseError::Syntax { ref expected, .. } if expected == "'('"), "{err:?}");
}

#[test]
fn test_earlier_markers_are_discarded_on_error() {
    let doc = "/**\n * @scalar (integer = 1)\n * @scalar (integer = )\n */";
    assert!(parser_with(&[scalar()]).parse(doc).is_err());
}

// === Attributes ===

#[test]
fn test_unknown_attribute() {
    let doc = "/** @nested (unknown=1) */";
    let err = parse_err(&[nested()], doc);
    match &err {
        ParseError::UnknownAttribute { node, attribute, span, body } => {
            assert_eq!(node, "nested");
            assert_eq!(attribute, "unknown");
            assert_eq!(&doc[span.start..span.end], "unknown");
            assert_eq!(body, doc);
        }
        other => panic!("expected unknown attribute, got {other:?}"),
    }
}

#[test]
fn test_string_is_not_an_integer() {
    let err = parse_err(&[scalar()], r#"/** @scalar (integer="a") */"#);
    match err {
        ParseError::Attribute { node, attribute, fault, .. } => {
            assert_eq!(node, "scalar");
            assert_eq!(attribute, "integer");
            assert_eq!(
                fault,
                AttributeFault::Value(ValueError {
                    value: "\"a\"".to_string(),
                    expected: ScalarKind::Integer,
                })
            );
        }
        other => panic!("expected attribute error, got {other:?}"),
    }
}

#[test]
fn test_bool_is_not_a_float() {
    let err = parse_err(&[scalar()], "/** @scalar (float=false) */");
    assert!(matches!(err, ParseError::Attribute { fault: AttributeFault::Value(_), .. }), "{err:?}");
}

#[test]
fn test_integer_is_not_a_float() {
    let err = parse_err(&[scalar()], "/** @scalar (float=1) */");
    assert!(matches!(err, ParseError::Attribute { .. }), "{err:?}");
}

#[test]
fn test_string_is_not_a_bool() {
    let err = parse_err(&[scalar()], r#"/** @scalar (bool="x") */"#);
    assert!(matches!(err, ParseError::Attribute { .. }), "{err:?}");
}

#[test]
fn test_null_is_not_a_string() {
    let err = parse_err(&[scalar()], "/** @scalar (string=null) */");
    assert!(matches!(err, ParseError::Attribute { .. }), "{err:?}");
}

#[test]
fn test_bad_array_element() {
    let doc = r#"/** @scalar (array_int = {1, "two"}) */"#;
    let err = parse_err(&[scalar()], doc);
    let span = err.span().unwrap();
    assert_eq!(&doc[span.start..span.end], "\"two\"");
}

#[test]
fn test_nested_tag_mismatch() {
    let doc = r#"/**
     * @nested (
     *     scalar=@nested(string="string")
     * )
     */"#;
    let err = parse_err(&[nested()], doc);
    match err {
        ParseError::Attribute { attribute, fault, .. } => {
            assert_eq!(attribute, "scalar");
            assert_eq!(
                fault,
                AttributeFault::TagMismatch {
                    expected: "scalar".to_string(),
                    found: "nested".to_string(),
                }
            );
        }
        other => panic!("expected tag mismatch, got {other:?}"),
    }
}

#[test]
fn test_error_message() {
    let err = parse_err(&[scalar()], r#"/** @scalar (integer="a") */"#);
    assert_eq!(
        err.to_string(),
        "invalid attribute `integer` on `@scalar` at 21..24: value \"a\" is not a valid integer"
    );
}

// === Limits ===

#[test]
fn test_integer_overflow() {
    let err = parse_err(&[scalar()], "/** @scalar (integer = 9223372036854775808) */");
    assert!(matches!(err, ParseError::InvalidLiteral { ref literal, .. } if literal == "9223372036854775808"));
}

#[test]
fn test_nesting_limit() {
    let mut parser = AnnotationParser::with_config(ParserConfig::default().with_max_depth(4));
    parser.register(nested()).unwrap();

    // marker, mm, row, matrix node: four levels
    assert!(parser.parse("/** @nested (mm = {{()}}) */").is_ok());

    let err = parser.parse("/** @nested (mm = {{(value = {})}}) */").unwrap_err();
    assert!(matches!(err, ParseError::NestingTooDeep { limit: 4, .. }), "{err:?}");
    assert_eq!(err.code(), "E-PARSE-006");
}
