//! Marginalia - Schema-driven doc-comment annotations
//!
//! This is the root workspace crate that provides integration tests.
//! The actual implementation is in the workspace member crates.

// Re-export main crates for convenience
pub use marginalia_ast as ast;
pub use marginalia_lexer as lexer;
pub use marginalia_parser as parser;

pub use marginalia_parser::{AnnotationParser, Annotations, ParseError, Reader};
