//! List views: positional access and existential matching.

use super::matching;
use super::node::Node;
use crate::error::ModelError;
use serde_json::Value;

/// Borrowed view over a JSON array.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListView<'a> {
    items: &'a [Value],
}

impl<'a> ListView<'a> {
    pub fn new(items: &'a [Value]) -> Self {
        ListView { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &'a [Value] {
        self.items
    }

    /// Element at `index`. Unlike key access, a bad position is an error.
    pub fn at(&self, index: usize) -> Result<Node<'a>, ModelError> {
        self.items
            .get(index)
            .map(Node::wrap)
            .ok_or(ModelError::IndexOutOfRange {
                index,
                len: self.items.len(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = Node<'a>> + 'a {
        self.items.iter().map(Node::wrap)
    }

    /// True if at least one element satisfies at least one candidate.
    ///
    /// A map candidate is a subset pattern: every key it names must be present
    /// in the element and match (see [`matching::value_matches`]). Any other
    /// candidate must equal the element exactly.
    pub fn can_match(&self, candidates: &[Value]) -> bool {
        self.items.iter().any(|element| {
            candidates
                .iter()
                .any(|candidate| matching::element_matches(element, candidate))
        })
    }

    /// Single-pattern form of [`ListView::can_match`].
    pub fn matches(&self, pattern: &Value) -> bool {
        self.can_match(std::slice::from_ref(pattern))
    }
}
