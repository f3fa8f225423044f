/*!
 * # Drop Cursor Engine
 *
 * Shows where dragged content will land while it is dragged over an editor
 * surface, and takes the indicator away when the drag ends, is cancelled or
 * goes quiet.
 *
 * ## Architecture Overview
 *
 * ```text
 * dragover ─▶ EditorView::pos_at_coords ─▶ target::resolve ─▶ Lifecycle::apply ─▶ Effects
 *                                                                               │
 *                                     Overlay::show_at / hide / destroy ◀──────┤
 *                                     RemovalTimer::schedule / cancel   ◀──────┘
 * ```
 *
 * - **`target`**: walks the ancestors of the pointer position until one
 *   accepts the dragged slice, snapping to the nearer child boundary
 * - **`lifecycle`**: pure `(state, event) -> (state, effects)` transition
 *   function over `Idle` / `Active(pos)` / `Suspended(pos)`
 * - **`view`**: `DropCursorView`, the per-view binding owning the options,
 *   the overlay and the single removal timer
 * - **`host`** / **`overlay`**: the collaborator traits a host implements
 * - **`geometry`**: turns a document position into overlay placement
 *
 * Nothing in here fails loudly: an unresolvable target falls back to the raw
 * pointer position, a position the host cannot map means no update, and a
 * stale cursor is simply cleared.
 */

pub mod geometry;
pub mod host;
pub mod lifecycle;
pub mod options;
pub mod overlay;
pub mod target;
pub mod timer;
pub mod view;

pub use dropcursor_config::ConfigError;
pub use geometry::{Coords, CursorKind, OverlayParent, OverlayPlacement, Rect, SurfaceMetrics};
pub use host::{DragLeaveEvent, DragOverEvent, DropEffect, EditorView, PosHit};
pub use lifecycle::{CursorState, DragEvent, Effect, Lifecycle, Timeouts};
pub use options::{DropCursorOptions, DropPointPredicate};
pub use overlay::{CursorStyle, Overlay};
pub use timer::RemovalTimer;
pub use view::DropCursorView;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::{Arc, LazyLock};

    use dropcursor_model::{Document, Fragment, Node, NodeSpec, Schema, Slice};

    static SCHEMA: LazyLock<Arc<Schema>> = LazyLock::new(|| {
        Schema::new(vec![
            NodeSpec::new("doc").content("block+"),
            NodeSpec::new("paragraph").content("inline*").group("block"),
            NodeSpec::new("bullet_list").content("list_item+").group("block"),
            NodeSpec::new("list_item").content("paragraph block*"),
            NodeSpec::new("horizontal_rule").group("block"),
            NodeSpec::new("footnote"),
            NodeSpec::new("text").group("inline").inline(),
        ])
        .unwrap()
    });

    pub fn node(name: &str, children: Vec<Node>) -> Node {
        SCHEMA.node(name, children).unwrap()
    }

    pub fn text(s: &str) -> Node {
        SCHEMA.text(s).unwrap()
    }

    pub fn paragraph(children: Vec<Node>) -> Node {
        node("paragraph", children)
    }

    pub fn closed(nodes: Vec<Node>) -> Slice {
        Slice::closed(Fragment::new(nodes))
    }

    /// doc(p("ab"), list(item(p("c"))))
    pub fn sample_doc() -> Document {
        let root = node(
            "doc",
            vec![
                paragraph(vec![text("ab")]),
                node(
                    "bullet_list",
                    vec![node("list_item", vec![paragraph(vec![text("c")])])],
                ),
            ],
        );
        Document::new(SCHEMA.clone(), root)
    }

    /// doc(list(item(p())))
    pub fn list_doc() -> Document {
        let root = node(
            "doc",
            vec![node(
                "bullet_list",
                vec![node("list_item", vec![paragraph(vec![])])],
            )],
        );
        Document::new(SCHEMA.clone(), root)
    }
}
