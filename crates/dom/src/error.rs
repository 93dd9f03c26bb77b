//! Error types for tree operations.
//!
//! Simple, flat error hierarchy. Every failure is fatal and synchronous:
//! it propagates to the immediate caller and there is no partial rollback —
//! mutations applied before the failing step remain in place.

use crate::types::{NodeId, NodeType};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DomError>;

#[derive(Debug, Error)]
pub enum DomError {
    #[error("node not found in arena: {0}")]
    NodeNotFound(NodeId),

    #[error("{op}: node {node} is not an element")]
    NotAnElement { op: &'static str, node: NodeId },

    #[error("{op}: node {node} is not a child of node {parent}")]
    ChildNotFound {
        op: &'static str,
        node: NodeId,
        parent: NodeId,
    },

    #[error("second root element: <{name}>")]
    SecondRootElement { name: String },

    #[error("multiple !DOCTYPE directives")]
    MultipleDoctypes,

    #[error("unsupported directive: {name}")]
    UnsupportedDirective { name: String },

    #[error("{op} is not supported in a server-side tree")]
    Unsupported { op: &'static str },

    #[error("unsupported node kind {kind} reached during {op} (node {node})")]
    UnsupportedNodeKind {
        op: &'static str,
        node: NodeId,
        kind: NodeType,
    },

    #[error("tokenizer error: {0}")]
    Tokenizer(String),
}
