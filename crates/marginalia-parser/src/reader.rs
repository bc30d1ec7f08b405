//! Per-declaration annotation reading
//!
//! Classes, methods and properties usually accept different annotations,
//! so the reader keeps one parser per declaration kind. All three start as
//! copies of a shared base parser.

use std::fmt;
use std::sync::Arc;

use marginalia_ast::NodeType;
use serde::{Deserialize, Serialize};

use crate::{AnnotationParser, Annotations, ParseError, RegistryError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    Class,
    Method,
    Property,
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclarationKind::Class => write!(f, "class"),
            DeclarationKind::Method => write!(f, "method"),
            DeclarationKind::Property => write!(f, "property"),
        }
    }
}

/// A declaration that may carry a doc comment
pub trait DocSource {
    fn kind(&self) -> DeclarationKind;

    /// The raw doc comment, delimiters included
    fn doc_comment(&self) -> Option<&str>;
}

#[derive(Debug, Clone, Default)]
pub struct Reader {
    class: AnnotationParser,
    method: AnnotationParser,
    property: AnnotationParser,
}

impl Reader {
    pub fn new(base: AnnotationParser) -> Self {
        Self {
            class: base.clone(),
            method: base.clone(),
            property: base,
        }
    }

    pub fn with_class_annotations<I, T>(mut self, types: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = T>,
        T: Into<Arc<NodeType>>,
    {
        register_all(&mut self.class, types)?;
        Ok(self)
    }

    pub fn with_method_annotations<I, T>(mut self, types: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = T>,
        T: Into<Arc<NodeType>>,
    {
        register_all(&mut self.method, types)?;
        Ok(self)
    }

    pub fn with_property_annotations<I, T>(mut self, types: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = T>,
        T: Into<Arc<NodeType>>,
    {
        register_all(&mut self.property, types)?;
        Ok(self)
    }

    pub fn parser(&self, kind: DeclarationKind) -> &AnnotationParser {
        match kind {
            DeclarationKind::Class => &self.class,
            DeclarationKind::Method => &self.method,
            DeclarationKind::Property => &self.property,
        }
    }

    /// Annotations of a declaration, using the parser for its kind
    pub fn read(&self, declaration: &impl DocSource) -> Result<Annotations, ParseError> {
        let parser = self.parser(declaration.kind());
        parser.parse(declaration.doc_comment().unwrap_or_default())
    }

    pub fn class_annotations(&self, doc: &str) -> Result<Annotations, ParseError> {
        self.class.parse(doc)
    }

    pub fn method_annotations(&self, doc: &str) -> Result<Annotations, ParseError> {
        self.method.parse(doc)
    }

    pub fn property_annotations(&self, doc: &str) -> Result<Annotations, ParseError> {
        self.property.parse(doc)
    }
}

fn register_all<I, T>(parser: &mut AnnotationParser, types: I) -> Result<(), RegistryError>
where
    I: IntoIterator<Item = T>,
    T: Into<Arc<NodeType>>,
{
    for node_type in types {
        parser.register(node_type)?;
    }
    Ok(())
}
