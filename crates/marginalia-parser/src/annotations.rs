//! Parse results

use std::ops::Index;

use indexmap::map::Entry;
use indexmap::IndexMap;
use marginalia_ast::Node;
use serde::Serialize;

/// Everything found under one marker name in a comment body
///
/// A name seen once stays a single node; a second occurrence promotes
/// the entry to a list that keeps source order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Annotation {
    Single(Node),
    Repeated(Vec<Node>),
}

impl Annotation {
    /// The node, if the marker occurred exactly once
    pub fn as_single(&self) -> Option<&Node> {
        match self {
            Annotation::Single(node) => Some(node),
            Annotation::Repeated(_) => None,
        }
    }

    pub fn is_repeated(&self) -> bool {
        matches!(self, Annotation::Repeated(_))
    }

    /// All occurrences in source order, whatever the shape
    pub fn nodes(&self) -> std::slice::Iter<'_, Node> {
        match self {
            Annotation::Single(node) => std::slice::from_ref(node).iter(),
            Annotation::Repeated(nodes) => nodes.iter(),
        }
    }

    fn push(&mut self, node: Node) {
        let previous = std::mem::replace(self, Annotation::Repeated(Vec::new()));
        *self = match previous {
            Annotation::Single(first) => Annotation::Repeated(vec![first, node]),
            Annotation::Repeated(mut nodes) => {
                nodes.push(node);
                Annotation::Repeated(nodes)
            }
        };
    }
}

/// Marker name to the annotation(s) found under it
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Annotations {
    entries: IndexMap<String, Annotation>,
}

impl Annotations {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, node: Node) {
        match self.entries.entry(node.name().to_string()) {
            Entry::Vacant(entry) => {
                entry.insert(Annotation::Single(node));
            }
            Entry::Occupied(mut entry) => entry.get_mut().push(node),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Annotation> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Annotation)> {
        self.entries.iter().map(|(name, annotation)| (name.as_str(), annotation))
    }

    pub fn into_inner(self) -> IndexMap<String, Annotation> {
        self.entries
    }
}

/// # Panics
///
/// Panics if no marker named `name` was parsed. Use [`Annotations::get`]
/// when the marker may be absent.
impl Index<&str> for Annotations {
    type Output = Annotation;

    fn index(&self, name: &str) -> &Annotation {
        match self.entries.get(name) {
            Some(annotation) => annotation,
            None => panic!("no annotation named `{name}`"),
        }
    }
}
