use marginalia::ast::Node;
use marginalia::{AnnotationParser, Annotations};

/// Assert that parsing succeeds
pub fn assert_parses(parser: &AnnotationParser, doc: &str) -> Annotations {
    match parser.parse(doc) {
        Ok(annotations) => annotations,
        Err(e) => panic!("Expected doc comment to parse successfully: {e}\n{doc}"),
    }
}

/// Assert that parsing fails
pub fn assert_parse_fails(parser: &AnnotationParser, doc: &str) {
    assert!(parser.parse(doc).is_err(), "Expected doc comment to fail parsing:\n{doc}");
}

/// Assert the result holds exactly one `@name` and return it
pub fn assert_single<'a>(annotations: &'a Annotations, name: &str) -> &'a Node {
    annotations
        .get(name)
        .and_then(|a| a.as_single())
        .unwrap_or_else(|| panic!("Expected exactly one @{name}, got {annotations:?}"))
}
