//! Parser error types

use marginalia_ast::{NodeError, Span};
use marginalia_lexer::TokenKind;
use thiserror::Error;

use crate::ValueError;

/// Errors from building the schema registry
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    #[error("node type `{name}` is already registered")]
    DuplicateNode { name: String },
}

/// Why an attribute value was rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AttributeFault {
    #[error(transparent)]
    Value(#[from] ValueError),

    #[error("expected `@{expected}`, found `@{found}`")]
    TagMismatch { expected: String, found: String },

    #[error(transparent)]
    Node(#[from] NodeError),
}

/// Errors from parsing one comment body
///
/// Every positional error carries the original comment body it was
/// raised against, so it can be reported without the caller keeping it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("no node types are registered")]
    EmptyRegistry,

    #[error("syntax error: expected {expected}, found {found} at {span}")]
    Syntax {
        expected: String,
        found: String,
        span: Span,
        body: String,
    },

    #[error("unknown attribute `{attribute}` on `@{node}` at {span}")]
    UnknownAttribute {
        node: String,
        attribute: String,
        span: Span,
        body: String,
    },

    #[error("invalid attribute `{attribute}` on `@{node}` at {span}: {fault}")]
    Attribute {
        node: String,
        attribute: String,
        #[source]
        fault: AttributeFault,
        span: Span,
        body: String,
    },

    #[error("invalid literal {literal} at {span}")]
    InvalidLiteral {
        literal: String,
        span: Span,
        body: String,
    },

    #[error("annotation nested deeper than {limit} levels at {span}")]
    NestingTooDeep {
        limit: usize,
        span: Span,
        body: String,
    },
}

impl ParseError {
    pub fn span(&self) -> Option<Span> {
        match self {
            ParseError::EmptyRegistry => None,
            ParseError::Syntax { span, .. } => Some(*span),
            ParseError::UnknownAttribute { span, .. } => Some(*span),
            ParseError::Attribute { span, .. } => Some(*span),
            ParseError::InvalidLiteral { span, .. } => Some(*span),
            ParseError::NestingTooDeep { span, .. } => Some(*span),
        }
    }

    /// The comment body the error was raised against
    pub fn body(&self) -> Option<&str> {
        match self {
            ParseError::EmptyRegistry => None,
            ParseError::Syntax { body, .. }
            | ParseError::UnknownAttribute { body, .. }
            | ParseError::Attribute { body, .. }
            | ParseError::InvalidLiteral { body, .. }
            | ParseError::NestingTooDeep { body, .. } => Some(body),
        }
    }

    /// Error code for machine-readable output
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::EmptyRegistry => "E-PARSE-001",
            ParseError::Syntax { .. } => "E-PARSE-002",
            ParseError::UnknownAttribute { .. } => "E-PARSE-003",
            ParseError::Attribute { .. } => "E-PARSE-004",
            ParseError::InvalidLiteral { .. } => "E-PARSE-005",
            ParseError::NestingTooDeep { .. } => "E-PARSE-006",
        }
    }

    pub fn unexpected(expected: impl Into<String>, found: TokenKind, text: &str, span: Span, body: &str) -> Self {
        let found = match found {
            TokenKind::Eof => found.describe().to_string(),
            _ => format!("'{text}'"),
        };
        ParseError::Syntax {
            expected: expected.into(),
            found,
            span,
            body: body.to_string(),
        }
    }
}
