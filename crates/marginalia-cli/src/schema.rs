//! JSON schema files
//!
//! ```json
//! {
//!   "types": [
//!     {"name": "scalar", "attributes": {"value": "integer"}},
//!     {"name": "list", "attributes": {"items": ["scalar"]}}
//!   ],
//!   "register": ["list"]
//! }
//! ```
//!
//! A descriptor is a scalar kind, the name of an earlier type, or a
//! one-element array wrapping a descriptor. Without `register`, every
//! type is registered as a top-level marker.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use marginalia_ast::{Descriptor, NodeType, ScalarKind};
use marginalia_parser::{AnnotationParser, ParserConfig, RegistryError};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SchemaFile {
    types: Vec<TypeSpec>,
    #[serde(default)]
    register: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TypeSpec {
    name: String,
    #[serde(default)]
    attributes: IndexMap<String, DescriptorSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DescriptorSpec {
    Named(String),
    ArrayOf(Vec<DescriptorSpec>),
}

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("cannot read schema {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed schema: {0}")]
    Json(#[from] serde_json::Error),

    #[error("attribute `{attribute}` of `{node}` refers to unknown type `{name}`")]
    UnknownType {
        node: String,
        attribute: String,
        name: String,
    },

    #[error("attribute `{attribute}` of `{node}`: an array descriptor wraps exactly one descriptor, found {len}")]
    ArrayArity {
        node: String,
        attribute: String,
        len: usize,
    },

    #[error("cannot register `{name}`: no such type in the schema")]
    UnknownRegistration { name: String },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Read a schema file and build a parser from it
pub fn load(path: &Path, config: ParserConfig) -> Result<AnnotationParser, SchemaError> {
    let text = fs::read_to_string(path).map_err(|source| SchemaError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_schema(&text, config)
}

pub fn parse_schema(text: &str, config: ParserConfig) -> Result<AnnotationParser, SchemaError> {
    let file: SchemaFile = serde_json::from_str(text)?;

    let mut types: IndexMap<String, Arc<NodeType>> = IndexMap::new();
    for spec in file.types {
        if types.contains_key(&spec.name) {
            return Err(RegistryError::DuplicateNode { name: spec.name }.into());
        }
        let mut node_type = NodeType::new(spec.name.clone());
        for (attribute, descriptor) in &spec.attributes {
            let descriptor = resolve(descriptor, &types, &spec.name, attribute)?;
            node_type = node_type.with_attribute(attribute.clone(), descriptor);
        }
        types.insert(spec.name, Arc::new(node_type));
    }

    let mut parser = AnnotationParser::with_config(config);
    match file.register {
        Some(names) => {
            for name in names {
                let node_type = types
                    .get(&name)
                    .ok_or_else(|| SchemaError::UnknownRegistration { name: name.clone() })?;
                parser.register(Arc::clone(node_type))?;
            }
        }
        None => {
            for node_type in types.values() {
                parser.register(Arc::clone(node_type))?;
            }
        }
    }
    Ok(parser)
}

/// Only types declared earlier in the file can be referenced
fn resolve(
    spec: &DescriptorSpec,
    types: &IndexMap<String, Arc<NodeType>>,
    node: &str,
    attribute: &str,
) -> Result<Descriptor, SchemaError> {
    match spec {
        DescriptorSpec::Named(name) => {
            if let Some(kind) = ScalarKind::from_name(name) {
                return Ok(Descriptor::Scalar(kind));
            }
            match types.get(name) {
                Some(node_type) => Ok(Descriptor::node(Arc::clone(node_type))),
                None => Err(SchemaError::UnknownType {
                    node: node.to_string(),
                    attribute: attribute.to_string(),
                    name: name.clone(),
                }),
            }
        }
        DescriptorSpec::ArrayOf(inner) => match inner.as_slice() {
            [element] => Ok(Descriptor::array_of(resolve(element, types, node, attribute)?)),
            _ => Err(SchemaError::ArrayArity {
                node: node.to_string(),
                attribute: attribute.to_string(),
                len: inner.len(),
            }),
        },
    }
}
