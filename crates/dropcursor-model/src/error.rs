#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("Position {pos} out of range (document content size is {size})")]
    PositionOutOfRange { pos: usize, size: usize },
    #[error("Unknown node type or group in content expression: {0}")]
    UnknownNodeType(String),
    #[error("Invalid content expression {expr:?}: {reason}")]
    InvalidContentExpr { expr: String, reason: String },
    #[error("Node type defined twice: {0}")]
    DuplicateNodeType(String),
    #[error("Schema has no node types")]
    EmptySchema,
    #[error("Slice opens {open_start} levels but its content is only {depth} levels deep")]
    MalformedSlice { open_start: usize, depth: usize },
}
