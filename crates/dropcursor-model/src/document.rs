use std::sync::Arc;

use crate::{ModelError, Node, ResolvedPos, Schema};

/// Where pointer coordinates landed in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PosHit {
    /// Closest insertion position.
    pub pos: usize,
    /// Start position of the innermost node the pointer is over, if any.
    pub inside: Option<usize>,
}

/// A root node paired with the schema it was built from.
#[derive(Debug, Clone)]
pub struct Document {
    schema: Arc<Schema>,
    root: Node,
}

impl Document {
    pub fn new(schema: Arc<Schema>, root: Node) -> Self {
        Self { schema, root }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Largest valid position.
    pub fn content_size(&self) -> usize {
        self.root.content_size()
    }

    pub fn resolve(&self, pos: usize) -> Result<ResolvedPos<'_>, ModelError> {
        self.root.resolve(pos)
    }

    /// Node starting at `pos`, if any.
    pub fn node_at(&self, pos: usize) -> Option<&Node> {
        let mut node = &self.root;
        let mut pos = pos;
        loop {
            let (index, offset) = node.content().find_index(pos);
            let child = node.child(index)?;
            if offset == pos || child.is_text() {
                return Some(child);
            }
            pos -= offset + 1;
            node = child;
        }
    }
}
