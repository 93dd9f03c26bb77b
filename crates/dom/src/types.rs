//! Core type definitions for the document tree.
//!
//! Key design points:
//! 1. Nodes live in a `Vec` arena owned by the `Document`; `NodeId` is a
//!    plain `u32` index into it.
//! 2. Parent links are non-owning `Option<NodeId>` back-references; only
//!    the container operations that attach/detach a node touch them.
//! 3. Node payloads are a closed tagged enum (`NodeKind`) so every
//!    traversal and conversion site matches exhaustively — an unsupported
//!    kind can never be silently ignored.

use crate::attrs::AttrMap;
use crate::children::ChildList;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Node identifier (index into the document's arena).
pub type NodeId = u32;

/// Node type tags matching the classic DOM numeric constants.
///
/// This is a closed set: the model does not support CDATA sections,
/// entities, processing instructions, or document fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum NodeType {
    Element = 1,
    Attribute = 2,
    Text = 3,
    Comment = 8,
    Document = 9,
    DocumentType = 10,
}

impl NodeType {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(NodeType::Element),
            2 => Some(NodeType::Attribute),
            3 => Some(NodeType::Text),
            8 => Some(NodeType::Comment),
            9 => Some(NodeType::Document),
            10 => Some(NodeType::DocumentType),
            _ => None,
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeType::Element => "element",
            NodeType::Attribute => "attribute",
            NodeType::Text => "text",
            NodeType::Comment => "comment",
            NodeType::Document => "document",
            NodeType::DocumentType => "doctype",
        };
        f.write_str(name)
    }
}

/// The kind of an arena node and its payload.
///
/// Navigation (the parent back-reference) is stored in `NodeData`, not here.
/// `Attribute` and `Document` are node types without arena variants: an
/// attribute is a value held by its element's [`AttrMap`], and the document
/// is the arena owner itself.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// An element, e.g. `<div class="x">`. Owns its attribute map and its
    /// ordered child list.
    Element {
        /// Tag name, fixed at construction.
        name: String,
        attrs: AttrMap,
        children: ChildList,
    },

    /// A text node. `data` is raw — it serializes verbatim, no escaping.
    Text { data: String },

    /// A comment node; serializes as `<!--data-->`.
    Comment { data: String },

    /// A document type declaration, e.g. `<!DOCTYPE html>`. The entity and
    /// notation collections are placeholders and stay empty.
    Doctype {
        name: String,
        entities: AttrMap,
        notations: AttrMap,
    },
}

impl NodeKind {
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeKind::Element { .. } => NodeType::Element,
            NodeKind::Text { .. } => NodeType::Text,
            NodeKind::Comment { .. } => NodeType::Comment,
            NodeKind::Doctype { .. } => NodeType::DocumentType,
        }
    }
}

/// Storage for a single node in the arena: payload plus the non-owning
/// parent back-reference.
#[derive(Debug, Clone)]
pub(crate) struct NodeData {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
}

impl NodeData {
    pub(crate) fn new(kind: NodeKind) -> Self {
        Self { kind, parent: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_type_constants() {
        assert_eq!(NodeType::Element as u8, 1);
        assert_eq!(NodeType::Attribute as u8, 2);
        assert_eq!(NodeType::Text as u8, 3);
        assert_eq!(NodeType::Comment as u8, 8);
        assert_eq!(NodeType::Document as u8, 9);
        assert_eq!(NodeType::DocumentType as u8, 10);
    }

    #[test]
    fn test_node_type_from_u8() {
        assert_eq!(NodeType::from_u8(1), Some(NodeType::Element));
        assert_eq!(NodeType::from_u8(8), Some(NodeType::Comment));
        // CDATA sections are outside the supported set
        assert_eq!(NodeType::from_u8(4), None);
        assert_eq!(NodeType::from_u8(0), None);
        assert_eq!(NodeType::from_u8(11), None);
    }

    #[test]
    fn test_kind_reports_node_type() {
        let text = NodeKind::Text {
            data: "hi".to_string(),
        };
        assert_eq!(text.node_type(), NodeType::Text);

        let doctype = NodeKind::Doctype {
            name: "html".to_string(),
            entities: AttrMap::default(),
            notations: AttrMap::default(),
        };
        assert_eq!(doctype.node_type(), NodeType::DocumentType);
    }
}
