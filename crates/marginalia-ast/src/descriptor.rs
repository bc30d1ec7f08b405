//! Attribute descriptors
//!
//! A descriptor declares the shape an attribute value must have: a scalar
//! kind, a nested node type, or an array wrapping another descriptor.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize, Serializer};

use crate::{NodeType, Value};

/// Scalar kinds an attribute can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    String,
    Integer,
    Float,
    Bool,
    /// Any scalar, `null` included
    Mixed,
}

impl ScalarKind {
    pub fn describe(&self) -> &'static str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Integer => "integer",
            ScalarKind::Float => "float",
            ScalarKind::Bool => "bool",
            ScalarKind::Mixed => "mixed",
        }
    }

    /// Look up a kind by its schema name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(ScalarKind::String),
            "integer" | "int" => Some(ScalarKind::Integer),
            "float" => Some(ScalarKind::Float),
            "bool" | "boolean" => Some(ScalarKind::Bool),
            "mixed" => Some(ScalarKind::Mixed),
            _ => None,
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Declared shape of one attribute
#[derive(Debug, Clone, PartialEq)]
pub enum Descriptor {
    /// `integer`, `string`, ...
    Scalar(ScalarKind),
    /// A nested marker of the given type: `(...)` or `@name(...)`
    Node(Arc<NodeType>),
    /// `{...}` whose elements follow the inner descriptor
    ArrayOf(Box<Descriptor>),
}

impl Descriptor {
    pub const STRING: Descriptor = Descriptor::Scalar(ScalarKind::String);
    pub const INTEGER: Descriptor = Descriptor::Scalar(ScalarKind::Integer);
    pub const FLOAT: Descriptor = Descriptor::Scalar(ScalarKind::Float);
    pub const BOOL: Descriptor = Descriptor::Scalar(ScalarKind::Bool);
    pub const MIXED: Descriptor = Descriptor::Scalar(ScalarKind::Mixed);

    pub fn node(node_type: impl Into<Arc<NodeType>>) -> Self {
        Descriptor::Node(node_type.into())
    }

    pub fn array_of(inner: Descriptor) -> Self {
        Descriptor::ArrayOf(Box::new(inner))
    }

    /// Whether `value` has the shape this descriptor declares
    pub fn admits(&self, value: &Value) -> bool {
        match (self, value) {
            (Descriptor::Scalar(ScalarKind::Mixed), value) => value.is_scalar(),
            (Descriptor::Scalar(ScalarKind::String), Value::String(_)) => true,
            (Descriptor::Scalar(ScalarKind::Integer), Value::Int(_)) => true,
            (Descriptor::Scalar(ScalarKind::Float), Value::Float(_)) => true,
            (Descriptor::Scalar(ScalarKind::Bool), Value::Bool(_)) => true,
            (Descriptor::Node(expected), Value::Node(node)) => node.name() == expected.name(),
            (Descriptor::ArrayOf(inner), Value::Array(array)) => {
                array.values().all(|element| inner.admits(element))
            }
            _ => false,
        }
    }

    /// Human-readable form: `integer`, `@scalar`, `[[@matrix]]`
    pub fn describe(&self) -> String {
        match self {
            Descriptor::Scalar(kind) => kind.describe().to_string(),
            Descriptor::Node(node_type) => format!("@{}", node_type.name()),
            Descriptor::ArrayOf(inner) => format!("[{}]", inner.describe()),
        }
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

// Serialized the way schema files spell descriptors
impl Serialize for Descriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Descriptor::Scalar(kind) => serializer.serialize_str(kind.describe()),
            Descriptor::Node(node_type) => serializer.serialize_str(node_type.name()),
            Descriptor::ArrayOf(inner) => [inner.as_ref()].serialize(serializer),
        }
    }
}
