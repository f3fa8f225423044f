#![allow(dead_code)]

use std::sync::{Arc, LazyLock};

use dropcursor_engine::{
    Coords, CursorStyle, EditorView, Overlay, OverlayParent, OverlayPlacement, PosHit, Rect,
    SurfaceMetrics,
};
use dropcursor_model::{Document, DropCursorPolicy, Fragment, Node, NodeSpec, Schema, Slice};

pub static SCHEMA: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::new(vec![
        NodeSpec::new("doc").content("block+"),
        NodeSpec::new("paragraph").content("inline*").group("block"),
        NodeSpec::new("bullet_list").content("list_item+").group("block"),
        NodeSpec::new("list_item").content("paragraph block*"),
        NodeSpec::new("horizontal_rule")
            .group("block")
            .drop_cursor(DropCursorPolicy::Disable),
        NodeSpec::new("text").group("inline").inline(),
    ])
    .unwrap()
});

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn node(name: &str, children: Vec<Node>) -> Node {
    SCHEMA.node(name, children).unwrap()
}

pub fn text(s: &str) -> Node {
    SCHEMA.text(s).unwrap()
}

pub fn paragraph(s: &str) -> Node {
    if s.is_empty() {
        node("paragraph", vec![])
    } else {
        node("paragraph", vec![text(s)])
    }
}

pub fn doc(children: Vec<Node>) -> Document {
    Document::new(SCHEMA.clone(), node("doc", children))
}

/// doc(p("ab"), list(item(p("c"))))
///
/// ```text
/// 0 <p> 1 a 2 b 3 </p> 4 <list> 5 <item> 6 <p> 7 c 8 </p> 9 </item> 10 </list> 11
/// ```
pub fn sample_doc() -> Document {
    doc(vec![
        paragraph("ab"),
        node("bullet_list", vec![node("list_item", vec![paragraph("c")])]),
    ])
}

pub fn paragraph_slice(s: &str) -> Slice {
    Slice::closed(Fragment::new(vec![paragraph(s)]))
}

/// Host view with a synthetic layout: the pointer's `left` coordinate is
/// the document position, node `n` spans rows `n*10..n*10+10`, and the caret
/// at `n` sits at `x = n*10`. With `placeable` off the host cannot lay out
/// any position.
pub struct FakeView {
    pub doc: Document,
    pub placeable: bool,
    pub editable: bool,
    pub supported: bool,
    pub slice: Option<Slice>,
    pub inside: Option<usize>,
    pub surface: SurfaceMetrics,
    pub parent: OverlayParent,
}

impl FakeView {
    pub fn new(doc: Document) -> Self {
        Self {
            doc,
            placeable: true,
            editable: true,
            supported: true,
            slice: None,
            inside: None,
            surface: SurfaceMetrics::unscaled(Rect::new(0.0, 0.0, 100.0, 200.0)),
            parent: OverlayParent::Page {
                scroll_x: 0.0,
                scroll_y: 0.0,
            },
        }
    }

    pub fn dragging(mut self, slice: Slice) -> Self {
        self.slice = Some(slice);
        self
    }
}

impl EditorView for FakeView {
    fn document(&self) -> &Document {
        &self.doc
    }

    fn pos_at_coords(&self, coords: Coords) -> Option<PosHit> {
        if coords.left < 0.0 || coords.top < 0.0 {
            return None;
        }
        let pos = coords.left as usize;
        (pos <= self.doc.content_size()).then_some(PosHit {
            pos,
            inside: self.inside,
        })
    }

    fn coords_at_pos(&self, pos: usize) -> Option<Rect> {
        if !self.placeable {
            return None;
        }
        let x = pos as f64 * 10.0;
        Some(Rect::new(x, 0.0, x, 16.0))
    }

    fn node_rect(&self, pos: usize) -> Option<Rect> {
        if !self.placeable {
            return None;
        }
        let node = self.doc.node_at(pos)?;
        if !node.is_block() {
            return None;
        }
        let top = pos as f64 * 10.0;
        Some(Rect::new(0.0, top, 100.0, top + 10.0))
    }

    fn surface(&self) -> SurfaceMetrics {
        self.surface
    }

    fn overlay_parent(&self) -> OverlayParent {
        self.parent
    }

    fn is_editable(&self) -> bool {
        self.editable
    }

    fn dragging_slice(&self) -> Option<&Slice> {
        self.slice.as_ref()
    }

    fn supports_drop_cursor(&self) -> bool {
        self.supported
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OverlayCall {
    Show(OverlayPlacement),
    Hide { by_class: bool },
    Destroy,
}

#[derive(Debug, Default)]
pub struct RecordingOverlay {
    pub calls: Vec<OverlayCall>,
}

impl RecordingOverlay {
    pub fn shows(&self) -> Vec<OverlayPlacement> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                OverlayCall::Show(placement) => Some(*placement),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, wanted: &OverlayCall) -> usize {
        self.calls.iter().filter(|call| *call == wanted).count()
    }
}

impl Overlay for RecordingOverlay {
    fn show_at(&mut self, placement: &OverlayPlacement, _style: &CursorStyle) {
        self.calls.push(OverlayCall::Show(*placement));
    }

    fn hide(&mut self, style: &CursorStyle) {
        self.calls.push(OverlayCall::Hide {
            by_class: style.inactive_class.is_some(),
        });
    }

    fn destroy(&mut self) {
        self.calls.push(OverlayCall::Destroy);
    }
}
