//! Node types and node instances

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::{Descriptor, Value};

/// Schema-bearing template that `@name` markers are matched against
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeType {
    name: String,
    schema: IndexMap<String, Descriptor>,
}

impl NodeType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: IndexMap::new(),
        }
    }

    /// Declare an attribute; a repeated name replaces the earlier descriptor
    pub fn with_attribute(mut self, name: impl Into<String>, descriptor: Descriptor) -> Self {
        self.schema.insert(name.into(), descriptor);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &IndexMap<String, Descriptor> {
        &self.schema
    }

    pub fn descriptor(&self, attribute: &str) -> Option<&Descriptor> {
        self.schema.get(attribute)
    }
}

/// Errors from setting node attributes directly
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NodeError {
    #[error("node `{node}` has no attribute `{attribute}`")]
    UnknownAttribute { node: String, attribute: String },

    #[error("attribute `{attribute}` of node `{node}` expects {expected}, got {found}")]
    ShapeMismatch {
        node: String,
        attribute: String,
        expected: String,
        found: &'static str,
    },
}

/// One occurrence of a marker: a fresh instance of its node type
///
/// Instances share the immutable type but never attribute state.
#[derive(Debug, Clone)]
pub struct Node {
    node_type: Arc<NodeType>,
    attributes: IndexMap<String, Value>,
}

impl Node {
    pub fn new(node_type: Arc<NodeType>) -> Self {
        Self {
            node_type,
            attributes: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        self.node_type.name()
    }

    pub fn schema(&self) -> &IndexMap<String, Descriptor> {
        self.node_type.schema()
    }

    pub fn node_type(&self) -> &Arc<NodeType> {
        &self.node_type
    }

    /// Set an attribute, checking the key and value shape against the schema
    ///
    /// Nothing is written when the check fails.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<Value>) -> Result<(), NodeError> {
        let value = value.into();
        let Some(descriptor) = self.node_type.descriptor(name) else {
            return Err(NodeError::UnknownAttribute {
                node: self.name().to_string(),
                attribute: name.to_string(),
            });
        };
        if !descriptor.admits(&value) {
            return Err(NodeError::ShapeMismatch {
                node: self.name().to_string(),
                attribute: name.to_string(),
                expected: descriptor.describe(),
                found: value.kind_name(),
            });
        }
        self.attributes.insert(name.to_string(), value);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Populated attributes in the order they were set
    pub fn attributes(&self) -> &IndexMap<String, Value> {
        &self.attributes
    }
}

// Structural: same type name and the same attribute values
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name() && self.attributes == other.attributes
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}(", self.name())?;
        for (i, (key, value)) in self.attributes.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}={value}")?;
        }
        f.write_str(")")
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut node = serializer.serialize_struct("Node", 2)?;
        node.serialize_field("name", self.name())?;
        node.serialize_field("attributes", &self.attributes)?;
        node.end()
    }
}
