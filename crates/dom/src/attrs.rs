//! Attribute nodes and the ordered, name-unique attribute map.

use crate::error::{DomError, Result};
use crate::types::{NodeId, NodeType};
use smallvec::SmallVec;
use std::fmt::Write;

/// A single attribute: an immutable `name`/`value` pair with a non-owning
/// back-reference to the element holding it.
///
/// Free-standing attributes (freshly built or cloned) have no owner until a
/// map adopts them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    name: String,
    value: String,
    /// True exactly when the name is `id`. XML DOMs allow id attributes
    /// under other names; this model does not.
    is_id: bool,
    owner: Option<NodeId>,
}

impl Attr {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let is_id = name == "id";
        Self {
            name,
            value: value.into(),
            is_id,
            owner: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_id(&self) -> bool {
        self.is_id
    }

    /// The element this attribute belongs to, if any.
    pub fn owner_element(&self) -> Option<NodeId> {
        self.owner
    }

    pub fn node_type(&self) -> NodeType {
        NodeType::Attribute
    }

    /// Copies name and value into a new, ownerless attribute.
    pub fn clone_node(&self) -> Attr {
        Attr::new(self.name.clone(), self.value.clone())
    }
}

/// Ordered collection of attributes, unique by name, owned by one element
/// (or by a doctype, for its placeholder entity/notation collections).
#[derive(Debug, Clone, Default)]
pub struct AttrMap {
    owner: Option<NodeId>,
    items: SmallVec<[Attr; 4]>,
}

impl AttrMap {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Positional access; `None` beyond bounds.
    pub fn item(&self, index: usize) -> Option<&Attr> {
        self.items.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attr> {
        self.items.iter()
    }

    /// Linear lookup by name.
    pub fn get_named_item(&self, name: &str) -> Option<&Attr> {
        self.items.iter().find(|attr| attr.name == name)
    }

    /// Adds an attribute, or replaces the same-named entry in place.
    ///
    /// Replacement keeps the positional slot of the first insertion; the
    /// replaced node's identity is not preserved. The owner back-reference
    /// is stamped on newly appended attributes.
    pub fn set_named_item(&mut self, attr: Attr) {
        if let Some(slot) = self.items.iter_mut().find(|a| a.name == attr.name) {
            *slot = attr;
            return;
        }
        let mut attr = attr;
        attr.owner = self.owner;
        self.items.push(attr);
    }

    /// Removes and returns the named attribute. Removing an absent name is
    /// not an error — contrast with `remove_child`.
    pub fn remove_named_item(&mut self, name: &str) -> Option<Attr> {
        let index = self.items.iter().position(|attr| attr.name == name)?;
        Some(self.items.remove(index))
    }

    pub fn get_named_item_ns(&self, _namespace_uri: &str, _local_name: &str) -> Result<&Attr> {
        Err(DomError::Unsupported {
            op: "get_named_item_ns",
        })
    }

    pub fn set_named_item_ns(&mut self, _attr: Attr) -> Result<()> {
        Err(DomError::Unsupported {
            op: "set_named_item_ns",
        })
    }

    pub fn remove_named_item_ns(&mut self, _namespace_uri: &str, _local_name: &str) -> Result<Attr> {
        Err(DomError::Unsupported {
            op: "remove_named_item_ns",
        })
    }

    pub(crate) fn set_owner(&mut self, owner: NodeId) {
        self.owner = Some(owner);
    }

    /// Writes ` name="value"` for each attribute in stored order. Values go
    /// out verbatim — no escaping, even for embedded quotes.
    pub(crate) fn write_markup(&self, out: &mut String) {
        for attr in &self.items {
            let _ = write!(out, " {}=\"{}\"", attr.name, attr.value);
        }
    }
}
