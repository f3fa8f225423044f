use crate::{ModelError, Node};

#[derive(Debug, Clone, Copy)]
struct Step<'a> {
    node: &'a Node,
    index: usize,
    /// Absolute position where the child at `index` starts.
    offset: usize,
}

/// A position resolved against a document, giving access to its ancestors.
///
/// Depth 0 is the root node. `depth()` is the depth of the innermost node
/// whose content contains the position.
#[derive(Debug, Clone)]
pub struct ResolvedPos<'a> {
    pos: usize,
    path: Vec<Step<'a>>,
    parent_offset: usize,
}

impl<'a> ResolvedPos<'a> {
    pub(crate) fn resolve(root: &'a Node, pos: usize) -> Result<Self, ModelError> {
        let size = root.content_size();
        if pos > size {
            return Err(ModelError::PositionOutOfRange { pos, size });
        }

        let mut path = Vec::new();
        let mut start = 0;
        let mut parent_offset = pos;
        let mut node = root;
        loop {
            let (index, offset) = node.content().find_index(parent_offset);
            let rem = parent_offset - offset;
            path.push(Step {
                node,
                index,
                offset: start + offset,
            });
            if rem == 0 {
                break;
            }
            let Some(child) = node.child(index) else {
                break;
            };
            if child.is_text() {
                break;
            }
            parent_offset = rem - 1;
            start += offset + 1;
            node = child;
        }

        Ok(Self {
            pos,
            path,
            parent_offset,
        })
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn depth(&self) -> usize {
        self.path.len() - 1
    }

    /// Offset of the position inside its parent's content.
    pub fn parent_offset(&self) -> usize {
        self.parent_offset
    }

    pub fn parent(&self) -> &'a Node {
        self.node(self.depth())
    }

    pub fn doc(&self) -> &'a Node {
        self.path[0].node
    }

    /// Ancestor at depth `d`.
    ///
    /// # Panics
    ///
    /// If `d > depth()`. [`ResolvedPos::ancestor`] is the checked form.
    pub fn node(&self, d: usize) -> &'a Node {
        self.path[d].node
    }

    /// Ancestor at depth `d`, or `None` past the innermost depth.
    pub fn ancestor(&self, d: usize) -> Option<&'a Node> {
        self.path.get(d).map(|step| step.node)
    }

    /// Index into the ancestor at depth `d` of the child the position falls in
    /// (or before, at the innermost depth).
    ///
    /// # Panics
    ///
    /// If `d > depth()`.
    pub fn index(&self, d: usize) -> usize {
        self.path[d].index
    }

    /// Start of the content of the ancestor at depth `d`.
    ///
    /// # Panics
    ///
    /// If `d > depth()`.
    pub fn start(&self, d: usize) -> usize {
        if d == 0 { 0 } else { self.path[d - 1].offset + 1 }
    }

    /// End of the content of the ancestor at depth `d`.
    ///
    /// # Panics
    ///
    /// If `d > depth()`.
    pub fn end(&self, d: usize) -> usize {
        self.start(d) + self.node(d).content_size()
    }

    /// Position directly before the ancestor at depth `d` (`d >= 1`).
    /// `depth() + 1` names the node directly after the position.
    ///
    /// # Panics
    ///
    /// If `d > depth() + 1`, or in debug builds if `d == 0`.
    pub fn before(&self, d: usize) -> usize {
        debug_assert!(d >= 1, "there is no position before the root");
        if d == self.depth() + 1 {
            self.pos
        } else {
            self.path[d - 1].offset
        }
    }

    /// Position directly after the ancestor at depth `d` (`d >= 1`).
    ///
    /// # Panics
    ///
    /// If `d > depth() + 1`, or in debug builds if `d == 0`.
    pub fn after(&self, d: usize) -> usize {
        debug_assert!(d >= 1, "there is no position after the root");
        if d == self.depth() + 1 {
            self.pos
        } else {
            self.path[d - 1].offset + self.node(d).node_size()
        }
    }

    /// Offset into the text node the position points into, 0 when it sits
    /// between nodes.
    pub fn text_offset(&self) -> usize {
        self.pos - self.path[self.depth()].offset
    }

    /// Node directly after the position. Inside a text node this is that
    /// whole text node.
    pub fn node_after(&self) -> Option<&'a Node> {
        self.parent().child(self.index(self.depth()))
    }

    /// Node directly before the position. Inside a text node this is that
    /// whole text node.
    pub fn node_before(&self) -> Option<&'a Node> {
        let index = self.index(self.depth());
        if self.text_offset() > 0 {
            return self.parent().child(index);
        }
        index.checked_sub(1).and_then(|i| self.parent().child(i))
    }
}
