//! Error types for the live page model.

use ego_tree::NodeId;

/// Errors raised by queries and mutations on a [`Document`](crate::Document).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// The CSS selector could not be parsed.
    #[error("invalid selector {0}")]
    Selector(String),

    /// The operation needs an element but the node is text, a comment or the root.
    #[error("node {0:?} is not an element")]
    NotAnElement(NodeId),

    /// The id does not belong to this document.
    #[error("unknown node {0:?}")]
    UnknownNode(NodeId),

    /// The insertion would break the tree (a cycle, a child under text, ...).
    #[error("hierarchy error: {0}")]
    Hierarchy(String),
}

/// Convenience type alias for live page results.
pub type Result<T> = std::result::Result<T, DomError>;
