//! Marginalia Parser - Schema-driven recursive descent parser
//!
//! Extracts typed annotations such as
//! `@route(path = "/users", methods = {"GET", "POST"})` from doc-comment
//! bodies. Only markers whose names are registered are recognised; every
//! other `@word` is ordinary comment text.
//!
//! Parsing is all-or-nothing: the first error aborts the whole comment
//! body and nothing parsed before it is returned.

mod annotations;
mod coerce;
mod config;
mod error;
mod parser;
mod reader;
mod registry;

pub use annotations::*;
pub use coerce::*;
pub use config::*;
pub use error::*;
pub use reader::*;
pub use registry::*;

use std::ops::Range;
use std::sync::Arc;

use marginalia_ast::NodeType;

use crate::parser::Parser;

/// A registry of node types plus parser configuration
///
/// Registration happens up front; `parse` takes `&self` and the parser
/// can be shared freely once built.
#[derive(Debug, Clone, Default)]
pub struct AnnotationParser {
    registry: Registry,
    config: ParserConfig,
}

impl AnnotationParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            registry: Registry::new(),
            config,
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Register a node type as a recognised top-level marker
    pub fn register(&mut self, node_type: impl Into<Arc<NodeType>>) -> Result<(), RegistryError> {
        self.registry.register(node_type)
    }

    /// Parse every registered marker in a doc-comment body
    ///
    /// Fails with `EmptyRegistry` when nothing is registered, even if the
    /// body holds no markers.
    pub fn parse(&self, body: &str) -> Result<Annotations, ParseError> {
        if self.registry.is_empty() {
            return Err(ParseError::EmptyRegistry);
        }

        let Some(region) = annotation_region(body) else {
            return Ok(Annotations::new());
        };

        Parser::new(body, region, &self.registry, self.config).parse_annotations()
    }
}

/// Byte range of the part of `body` that may hold markers
///
/// Starts at the first `@` that opens the body or follows a space, a tab
/// or `*`, and ends before any trailing `*`, `/` and whitespace. An `@`
/// right after a line break does not open the region.
pub fn annotation_region(body: &str) -> Option<Range<usize>> {
    let start = body.char_indices().find_map(|(i, c)| {
        let boundary = body[..i]
            .chars()
            .next_back()
            .map_or(true, |prev| matches!(prev, ' ' | '\t' | '*'));
        (c == '@' && boundary).then_some(i)
    })?;

    let rest = body[start..].trim_end_matches(|c: char| c == '*' || c == '/' || c.is_whitespace());
    Some(start..start + rest.len())
}
