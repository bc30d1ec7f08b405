//! Marginalia AST - Core types for parsed annotations
//!
//! This crate defines spans, attribute values, descriptors, and the
//! node types and node instances that markers are parsed into.

mod descriptor;
mod node;
mod span;
mod value;

pub use descriptor::*;
pub use node::*;
pub use span::*;
pub use value::*;
