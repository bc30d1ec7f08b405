//! Shared node-type fixtures for parser tests

#![allow(dead_code)]

use std::sync::Arc;

use marginalia_ast::{Descriptor, Node, NodeType, Value};
use marginalia_parser::{AnnotationParser, Annotations};

/// Every scalar kind plus arrays of strings, integers and floats
pub fn scalar() -> Arc<NodeType> {
    Arc::new(
        NodeType::new("scalar")
            .with_attribute("string", Descriptor::STRING)
            .with_attribute("integer", Descriptor::INTEGER)
            .with_attribute("bool", Descriptor::BOOL)
            .with_attribute("float", Descriptor::FLOAT)
            .with_attribute("mixed", Descriptor::MIXED)
            .with_attribute("array_str", Descriptor::array_of(Descriptor::STRING))
            .with_attribute("array_int", Descriptor::array_of(Descriptor::INTEGER))
            .with_attribute("array_float", Descriptor::array_of(Descriptor::FLOAT)),
    )
}

/// A two-dimensional integer matrix
pub fn matrix() -> Arc<NodeType> {
    Arc::new(
        NodeType::new("matrix")
            .with_attribute("value", Descriptor::array_of(Descriptor::array_of(Descriptor::INTEGER))),
    )
}

/// Nodes nested by reference: a scalar, a list of scalars, a matrix of matrices
pub fn nested() -> Arc<NodeType> {
    Arc::new(
        NodeType::new("nested")
            .with_attribute("name", Descriptor::STRING)
            .with_attribute("scalar", Descriptor::node(scalar()))
            .with_attribute("scalar_arr", Descriptor::array_of(Descriptor::node(scalar())))
            .with_attribute(
                "mm",
                Descriptor::array_of(Descriptor::array_of(Descriptor::node(matrix()))),
            ),
    )
}

pub fn parser_with(types: &[Arc<NodeType>]) -> AnnotationParser {
    let mut parser = AnnotationParser::new();
    for node_type in types {
        parser.register(Arc::clone(node_type)).unwrap();
    }
    parser
}

/// The single node parsed under `name`
pub fn single<'a>(annotations: &'a Annotations, name: &str) -> &'a Node {
    annotations[name]
        .as_single()
        .unwrap_or_else(|| panic!("`{name}` occurred more than once"))
}

/// `node.attr[i][j]...` through nested arrays
pub fn at<'a>(value: &'a Value, path: &[i64]) -> &'a Value {
    path.iter().fold(value, |value, index| {
        value
            .as_array()
            .and_then(|array| array.index(*index))
            .unwrap_or_else(|| panic!("no element {index} in {value}"))
    })
}
