use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use marginalia::ast::{Descriptor, NodeType};
use marginalia::parser::{DeclarationKind, DocSource};

/// Load a test fixture from tests/fixtures/
pub fn load_fixture(name: &str) -> String {
    let path = fixture_path(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load fixture {name}: {e}"))
}

pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Node types used by the controller fixtures
pub struct Schema {
    pub route: Arc<NodeType>,
    pub middleware: Arc<NodeType>,
    pub column: Arc<NodeType>,
    pub table: Arc<NodeType>,
}

impl Schema {
    pub fn new() -> Self {
        let middleware = Arc::new(
            NodeType::new("middleware")
                .with_attribute("name", Descriptor::STRING)
                .with_attribute("priority", Descriptor::INTEGER),
        );
        let route = Arc::new(
            NodeType::new("route")
                .with_attribute("path", Descriptor::STRING)
                .with_attribute("methods", Descriptor::array_of(Descriptor::STRING))
                .with_attribute("defaults", Descriptor::array_of(Descriptor::MIXED))
                .with_attribute(
                    "middleware",
                    Descriptor::array_of(Descriptor::node(Arc::clone(&middleware))),
                ),
        );
        let column = Arc::new(
            NodeType::new("column")
                .with_attribute("type", Descriptor::STRING)
                .with_attribute("nullable", Descriptor::BOOL)
                .with_attribute("precision", Descriptor::FLOAT),
        );
        let table = Arc::new(
            NodeType::new("table")
                .with_attribute("name", Descriptor::STRING)
                .with_attribute(
                    "indexes",
                    Descriptor::array_of(Descriptor::array_of(Descriptor::STRING)),
                ),
        );
        Self {
            route,
            middleware,
            column,
            table,
        }
    }
}

/// A declaration found in a fixture source file
#[derive(Debug)]
pub struct Declaration {
    pub kind: DeclarationKind,
    pub name: String,
    pub doc: Option<String>,
}

impl DocSource for Declaration {
    fn kind(&self) -> DeclarationKind {
        self.kind
    }

    fn doc_comment(&self) -> Option<&str> {
        self.doc.as_deref()
    }
}

/// Split a fixture into declarations
///
/// Recognises `class Name`, `function name(` and `$name;` lines; the
/// `/** ... */` block directly above is their doc comment.
pub fn declarations(source: &str) -> Vec<Declaration> {
    let mut declarations = Vec::new();
    let mut pending: Option<String> = None;
    let mut open: Option<String> = None;

    for line in source.lines() {
        let trimmed = line.trim();

        if let Some(doc) = open.as_mut() {
            doc.push('\n');
            doc.push_str(line);
            if trimmed.ends_with("*/") {
                pending = open.take();
            }
            continue;
        }
        if trimmed.starts_with("/**") {
            if trimmed.len() > 4 && trimmed.ends_with("*/") {
                pending = Some(trimmed.to_string());
            } else {
                open = Some(trimmed.to_string());
            }
            continue;
        }

        if let Some((kind, name)) = declared(trimmed) {
            declarations.push(Declaration {
                kind,
                name,
                doc: pending.take(),
            });
        }
    }

    declarations
}

fn declared(line: &str) -> Option<(DeclarationKind, String)> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let after = |keyword: &str| {
        let i = words.iter().position(|w| *w == keyword)?;
        words.get(i + 1).map(|w| w.split('(').next().unwrap_or_default().to_string())
    };

    if let Some(name) = after("class") {
        return Some((DeclarationKind::Class, name));
    }
    if let Some(name) = after("function") {
        return Some((DeclarationKind::Method, name));
    }
    let last = words.last()?;
    last.starts_with('$').then(|| {
        let name = last.trim_start_matches('$').trim_end_matches(';');
        (DeclarationKind::Property, name.to_string())
    })
}
