use dropcursor_model::Node;

use crate::EditorView;

/// Screen rectangle in host pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// Pointer coordinates in host pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Coords {
    pub left: f64,
    pub top: f64,
}

/// Layout of the editable surface: its on-screen rectangle and its unscaled
/// layout size, from which CSS-style transforms are derived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceMetrics {
    pub rect: Rect,
    pub offset_width: f64,
    pub offset_height: f64,
}

impl SurfaceMetrics {
    /// Unscaled surface with the given rectangle.
    pub fn unscaled(rect: Rect) -> Self {
        Self {
            rect,
            offset_width: rect.width(),
            offset_height: rect.height(),
        }
    }

    pub fn scale(&self) -> (f64, f64) {
        (
            ratio(self.rect.width(), self.offset_width),
            ratio(self.rect.height(), self.offset_height),
        )
    }
}

/// Element the overlay is positioned against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverlayParent {
    /// The statically positioned document body: coordinates are page based.
    Page { scroll_x: f64, scroll_y: f64 },
    /// A positioned ancestor of the surface.
    Positioned {
        rect: Rect,
        offset_width: f64,
        offset_height: f64,
        scroll_left: f64,
        scroll_top: f64,
    },
}

impl OverlayParent {
    fn origin(&self) -> (f64, f64) {
        match *self {
            OverlayParent::Page { scroll_x, scroll_y } => (-scroll_x, -scroll_y),
            OverlayParent::Positioned {
                rect,
                offset_width,
                offset_height,
                scroll_left,
                scroll_top,
            } => {
                let scale_x = ratio(rect.width(), offset_width);
                let scale_y = ratio(rect.height(), offset_height);
                (
                    rect.left - scroll_left * scale_x,
                    rect.top - scroll_top * scale_y,
                )
            }
        }
    }
}

/// Whether the cursor sits between blocks (horizontal bar) or inside inline
/// content (vertical caret).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorKind {
    Block,
    Inline,
}

impl CursorKind {
    pub fn class_name(&self) -> &'static str {
        match self {
            CursorKind::Block => "dropcursor-block",
            CursorKind::Inline => "dropcursor-inline",
        }
    }
}

/// Where the overlay element goes, in its parent's unscaled coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayPlacement {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub kind: CursorKind,
}

/// Screen rectangle of a cursor of the given thickness at `pos`.
///
/// Returns `None` when the host cannot map the position to pixels.
pub fn cursor_rect(view: &dyn EditorView, pos: usize, width: f64) -> Option<(Rect, CursorKind)> {
    let resolved = view.document().resolve(pos).ok()?;
    let (scale_x, scale_y) = view.surface().scale();
    let is_block = !resolved.parent().inline_content();

    if is_block {
        let before = resolved.node_before();
        let after = resolved.node_after();
        if before.is_some() || after.is_some() {
            let start = pos - before.map_or(0, Node::node_size);
            if let Some(node_rect) = view.node_rect(start) {
                let mut top = if before.is_some() {
                    node_rect.bottom
                } else {
                    node_rect.top
                };
                if before.is_some()
                    && after.is_some()
                    && let Some(next) = view.node_rect(pos)
                {
                    top = (top + next.top) / 2.0;
                }
                let half = width / 2.0 * scale_y;
                let rect = Rect::new(node_rect.left, top - half, node_rect.right, top + half);
                return Some((rect, CursorKind::Block));
            }
        }
    }

    let coords = view.coords_at_pos(pos)?;
    let half = width / 2.0 * scale_x;
    let rect = Rect::new(coords.left - half, coords.top, coords.left + half, coords.bottom);
    let kind = if is_block {
        CursorKind::Block
    } else {
        CursorKind::Inline
    };
    Some((rect, kind))
}

/// Translate a screen rectangle into the overlay parent's coordinate space.
pub fn place(view: &dyn EditorView, rect: Rect, kind: CursorKind) -> OverlayPlacement {
    let (scale_x, scale_y) = view.surface().scale();
    let (parent_left, parent_top) = view.overlay_parent().origin();
    OverlayPlacement {
        left: (rect.left - parent_left) / scale_x,
        top: (rect.top - parent_top) / scale_y,
        width: rect.width() / scale_x,
        height: rect.height() / scale_y,
        kind,
    }
}

fn ratio(scaled: f64, unscaled: f64) -> f64 {
    if unscaled > 0.0 && scaled > 0.0 {
        scaled / unscaled
    } else {
        1.0
    }
}
