use crate::{Fragment, ModelError};

/// A piece of a document, as carried by a drag.
///
/// `open_start` and `open_end` count how many levels at each edge are cut
/// open: the outer nodes on that side are fragments that merge into the
/// surrounding structure rather than complete nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Slice {
    content: Fragment,
    open_start: usize,
    open_end: usize,
}

impl Slice {
    pub fn new(content: Fragment, open_start: usize, open_end: usize) -> Self {
        Self {
            content,
            open_start,
            open_end,
        }
    }

    /// A slice of complete nodes.
    pub fn closed(content: Fragment) -> Self {
        Self::new(content, 0, 0)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn content(&self) -> &Fragment {
        &self.content
    }

    pub fn open_start(&self) -> usize {
        self.open_start
    }

    pub fn open_end(&self) -> usize {
        self.open_end
    }

    /// Number of positions the slice adds when inserted.
    pub fn size(&self) -> usize {
        self.content
            .size()
            .saturating_sub(self.open_start + self.open_end)
    }

    pub fn is_empty(&self) -> bool {
        self.content.size() == 0
    }

    /// The content that actually has to fit at an insertion point: the
    /// slice content with its `open_start` outer levels peeled off.
    pub fn shape(&self) -> Result<&Fragment, ModelError> {
        let mut content = &self.content;
        for depth in 0..self.open_start {
            content = content
                .first_child()
                .map(|child| child.content())
                .ok_or(ModelError::MalformedSlice {
                    open_start: self.open_start,
                    depth,
                })?;
        }
        Ok(content)
    }
}
