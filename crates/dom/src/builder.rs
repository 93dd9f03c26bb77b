//! One-shot conversion from tokenizer output into tree nodes.

use crate::document::Document;
use crate::error::Result;
use crate::token::{Token, TokenKind};
use crate::types::NodeId;

/// Converts tokens into arena nodes, one token tree at a time.
///
/// Directives convert to nothing here; they are meaningful only at the
/// document level of an import, which `Document` handles before delegating.
pub struct TreeBuilder<'d> {
    doc: &'d mut Document,
}

impl<'d> TreeBuilder<'d> {
    pub fn new(doc: &'d mut Document) -> Self {
        Self { doc }
    }

    /// Converts one token into zero or one node. Tag-like tokens become
    /// elements with attributes copied in the token's order and children
    /// converted recursively and appended in order.
    pub fn convert(&mut self, token: &Token) -> Result<Option<NodeId>> {
        match token.kind {
            TokenKind::Tag | TokenKind::Script | TokenKind::Style => {
                let element = self.doc.create_element(&token.name);
                for (name, value) in &token.attributes {
                    self.doc.set_attribute(element, name, value)?;
                }
                for child_token in &token.children {
                    if let Some(child) = self.convert(child_token)? {
                        self.doc.attach(element, child);
                    }
                }
                Ok(Some(element))
            }
            TokenKind::Text => Ok(Some(self.doc.create_text_node(&token.data))),
            TokenKind::Comment => Ok(Some(self.doc.create_comment(&token.data))),
            TokenKind::Directive => Ok(None),
        }
    }
}
