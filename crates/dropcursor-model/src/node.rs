use std::fmt;
use std::sync::Arc;

use crate::{ModelError, NodeType, ResolvedPos};

/// An ordered run of sibling nodes together with its total size.
#[derive(Clone, Default, PartialEq)]
pub struct Fragment {
    children: Vec<Node>,
    size: usize,
}

impl Fragment {
    pub fn new(children: Vec<Node>) -> Self {
        let size = children.iter().map(Node::node_size).sum();
        Self { children, size }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Size in positions of all children together.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn child(&self, index: usize) -> Option<&Node> {
        self.children.get(index)
    }

    pub fn first_child(&self) -> Option<&Node> {
        self.children.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.children.iter()
    }

    /// Child index containing `pos` and the offset at which that child
    /// starts. A position on a boundary maps to the child after it.
    pub(crate) fn find_index(&self, pos: usize) -> (usize, usize) {
        if pos == 0 {
            return (0, 0);
        }
        if pos >= self.size {
            return (self.children.len(), self.size);
        }
        let mut cur = 0;
        for (i, child) in self.children.iter().enumerate() {
            let end = cur + child.node_size();
            if end >= pos {
                if end == pos {
                    return (i + 1, end);
                }
                return (i, cur);
            }
            cur = end;
        }
        (self.children.len(), self.size)
    }
}

impl fmt::Debug for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.children).finish()
    }
}

/// A node in a document tree.
///
/// Positions follow the usual flat token scheme: each text character counts
/// one, a leaf node counts one, and a non-leaf node counts one for its
/// opening and one for its closing boundary on top of its content.
#[derive(Clone)]
pub struct Node {
    kind: Arc<NodeType>,
    content: Fragment,
    text: Option<String>,
}

impl Node {
    pub(crate) fn new(kind: Arc<NodeType>, content: Fragment) -> Self {
        Self {
            kind,
            content,
            text: None,
        }
    }

    pub(crate) fn new_text(kind: Arc<NodeType>, text: String) -> Self {
        Self {
            kind,
            content: Fragment::empty(),
            text: Some(text),
        }
    }

    pub fn node_type(&self) -> &Arc<NodeType> {
        &self.kind
    }

    pub fn type_name(&self) -> &str {
        self.kind.name()
    }

    pub fn is_text(&self) -> bool {
        self.text.is_some()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn is_leaf(&self) -> bool {
        self.kind.is_leaf()
    }

    pub fn is_inline(&self) -> bool {
        self.kind.is_inline()
    }

    pub fn is_block(&self) -> bool {
        !self.kind.is_inline()
    }

    pub fn inline_content(&self) -> bool {
        self.kind.inline_content()
    }

    pub fn content(&self) -> &Fragment {
        &self.content
    }

    pub fn content_size(&self) -> usize {
        self.content.size()
    }

    pub fn child_count(&self) -> usize {
        self.content.child_count()
    }

    pub fn child(&self, index: usize) -> Option<&Node> {
        self.content.child(index)
    }

    pub fn first_child(&self) -> Option<&Node> {
        self.content.first_child()
    }

    /// Number of positions this node takes up inside its parent.
    pub fn node_size(&self) -> usize {
        match &self.text {
            Some(text) => text.chars().count(),
            None if self.is_leaf() => 1,
            None => self.content.size() + 2,
        }
    }

    /// Whether replacing children `from..to` with `replacement` leaves this
    /// node's content valid for its type.
    pub fn can_replace(&self, from: usize, to: usize, replacement: &Fragment) -> bool {
        if from > to || to > self.child_count() {
            return false;
        }
        let children = &self.content.children;
        let names: Vec<&str> = children[..from]
            .iter()
            .chain(replacement.iter())
            .chain(children[to..].iter())
            .map(Node::type_name)
            .collect();
        self.kind.content_expr().matches(&names)
    }

    /// Like [`Node::can_replace`] for a single node of the given type.
    pub fn can_replace_with(&self, from: usize, to: usize, kind: &NodeType) -> bool {
        if from > to || to > self.child_count() {
            return false;
        }
        let children = &self.content.children;
        let names: Vec<&str> = children[..from]
            .iter()
            .map(Node::type_name)
            .chain(std::iter::once(kind.name()))
            .chain(children[to..].iter().map(Node::type_name))
            .collect();
        self.kind.content_expr().matches(&names)
    }

    /// Whether this node and all its descendants satisfy their content
    /// expressions.
    pub fn check(&self) -> bool {
        if self.is_text() {
            return true;
        }
        let names: Vec<&str> = self.content.iter().map(Node::type_name).collect();
        self.kind.content_expr().matches(&names) && self.content.iter().all(Node::check)
    }

    /// Resolve a position inside this node's content.
    pub fn resolve(&self, pos: usize) -> Result<ResolvedPos<'_>, ModelError> {
        ResolvedPos::resolve(self, pos)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.type_name() == other.type_name()
            && self.text == other.text
            && self.content == other.content
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.text {
            Some(text) => write!(f, "{text:?}"),
            None if self.content.child_count() == 0 => f.write_str(self.type_name()),
            None => {
                write!(f, "{}", self.type_name())?;
                f.debug_list().entries(self.content.iter()).finish()
            }
        }
    }
}
