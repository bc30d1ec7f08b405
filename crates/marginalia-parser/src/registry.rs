//! Schema registry: node-type name to prototype

use std::sync::Arc;

use indexmap::IndexMap;
use marginalia_ast::NodeType;

use crate::RegistryError;

/// Registered node types, keyed by marker name
///
/// Built once before parsing; read-only afterwards, so a parser can be
/// shared across threads.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    types: IndexMap<String, Arc<NodeType>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node type, failing if its name is taken
    pub fn register(&mut self, node_type: impl Into<Arc<NodeType>>) -> Result<(), RegistryError> {
        let node_type = node_type.into();
        if self.types.contains_key(node_type.name()) {
            return Err(RegistryError::DuplicateNode {
                name: node_type.name().to_string(),
            });
        }
        self.types.insert(node_type.name().to_string(), node_type);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&Arc<NodeType>> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Registered names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }
}
