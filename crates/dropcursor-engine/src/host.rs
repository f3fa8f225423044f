//! Collaborator contracts the host editor provides to the drop cursor.

use dropcursor_model::{Document, Slice};
pub use dropcursor_model::PosHit;

use crate::geometry::{Coords, OverlayParent, Rect, SurfaceMetrics};
use crate::target;

/// Host editor view as seen by the drop cursor.
pub trait EditorView {
    /// Current document.
    fn document(&self) -> &Document;

    /// Document position under the given pointer coordinates.
    fn pos_at_coords(&self, coords: Coords) -> Option<PosHit>;

    /// Caret rectangle for a position inside inline content.
    fn coords_at_pos(&self, pos: usize) -> Option<Rect>;

    /// Screen rectangle of the node starting at `pos`.
    fn node_rect(&self, pos: usize) -> Option<Rect>;

    fn surface(&self) -> SurfaceMetrics;

    fn overlay_parent(&self) -> OverlayParent;

    fn is_editable(&self) -> bool {
        true
    }

    /// Content being dragged from inside this editor, if any.
    fn dragging_slice(&self) -> Option<&Slice> {
        None
    }

    /// Hosts known to misbehave when the surface is touched mid-drag can
    /// report `false` to turn the drop cursor off.
    fn supports_drop_cursor(&self) -> bool {
        true
    }

    /// Where `slice` would land if dropped at `pos`. Hosts with their own
    /// drop point logic can override this.
    fn drop_point(&self, pos: usize, slice: &Slice) -> Option<usize> {
        Some(target::resolve(self.document(), pos, Some(slice)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragOverEvent {
    pub coords: Coords,
    /// Whether the event carries a data transfer the drop effect can be
    /// reported on.
    pub has_data_transfer: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragLeaveEvent {
    /// The element being left is the editable surface itself.
    pub target_is_surface: bool,
    /// The element being entered is still inside the surface.
    pub related_inside_surface: bool,
}

/// Feedback for the host's drag operation after a dragover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropEffect {
    Move,
    None,
    /// The event was ignored; leave the host's effect untouched.
    Unchanged,
}
