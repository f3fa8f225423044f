//! # dropcursor-model
//!
//! A small, read-only structural document model: just enough of a rich-text
//! editor's document for the drop cursor to reason about where dragged
//! content may legally land.
//!
//! - [`Schema`] / [`NodeType`] / [`NodeSpec`]: node types, groups and
//!   [`ContentExpr`] content expressions
//! - [`Node`] / [`Fragment`]: immutable trees with flat integer positions
//! - [`ResolvedPos`]: a position together with its ancestor chain
//! - [`Slice`]: dragged content, possibly open at its edges
//! - [`Document`]: a root node paired with its schema
//!
//! ```
//! use dropcursor_model::{Document, NodeSpec, Schema};
//!
//! let schema = Schema::new(vec![
//!     NodeSpec::new("doc").content("block+"),
//!     NodeSpec::new("paragraph").content("text*").group("block"),
//!     NodeSpec::new("text").inline(),
//! ])
//! .unwrap();
//! let para = schema.node("paragraph", vec![schema.text("hi").unwrap()]).unwrap();
//! let doc = Document::new(schema.clone(), schema.node("doc", vec![para]).unwrap());
//!
//! let pos = doc.resolve(2).unwrap();
//! assert_eq!(pos.depth(), 1);
//! assert_eq!(pos.parent().type_name(), "paragraph");
//! ```

pub mod content;
pub mod document;
pub mod error;
pub mod node;
pub mod resolved;
pub mod schema;
pub mod slice;

pub use content::ContentExpr;
pub use document::{Document, PosHit};
pub use error::ModelError;
pub use node::{Fragment, Node};
pub use resolved::ResolvedPos;
pub use schema::{DropCursorPolicy, DropCursorPredicate, NodeSpec, NodeType, Schema, TEXT_TYPE};
pub use slice::Slice;

#[cfg(test)]
pub(crate) fn test_schema() -> std::sync::Arc<Schema> {
    Schema::new(vec![
        NodeSpec::new("doc").content("block+"),
        NodeSpec::new("paragraph").content("inline*").group("block"),
        NodeSpec::new("bullet_list").content("list_item+").group("block"),
        NodeSpec::new("list_item").content("paragraph block*"),
        NodeSpec::new("horizontal_rule").group("block"),
        NodeSpec::new("text").group("inline").inline(),
    ])
    .unwrap()
}
