//! The document: arena owner and entry point for every tree operation.
//!
//! Ownership follows one direction only. The document owns the node arena;
//! each element owns its attribute map and child list; `parent` links are
//! plain index back-references that keep nothing alive. Removing a node from
//! its container detaches it — the arena keeps its storage until the
//! document is dropped.
//!
//! Everything here is synchronous and single-threaded. Traversal callbacks
//! receive `&Document`, so mutating the tree mid-walk is unrepresentable.

use crate::attrs::{Attr, AttrMap};
use crate::builder::TreeBuilder;
use crate::children::ChildList;
use crate::error::{DomError, Result};
use crate::serializer;
use crate::token::{Token, TokenKind, Tokenize};
use crate::types::{NodeData, NodeId, NodeKind, NodeType};

/// Depth-first traversal callbacks. All methods are optional.
///
/// `enter_element` may return `false` to skip descending into that subtree;
/// a skipped element's children are not visited and `leave_element` does not
/// fire for it — leave only fires for elements that were descended into.
pub trait Visitor {
    fn enter_element(&mut self, _doc: &Document, _element: NodeId) -> bool {
        true
    }

    fn leave_element(&mut self, _doc: &Document, _element: NodeId) {}

    fn visit_text(&mut self, _doc: &Document, _node: NodeId) {}

    fn visit_comment(&mut self, _doc: &Document, _node: NodeId) {}
}

/// An in-memory markup document.
///
/// Construction variants:
/// - [`Document::new`] — minimal `<html><body></body></html>` skeleton;
/// - [`Document::parse`] — tokenize and import markup text as the whole
///   document;
/// - [`Document::empty`] plus [`Document::set_document_element`] — adopt an
///   element built through the factories as the root.
#[derive(Debug)]
pub struct Document {
    /// All nodes, stored sequentially; ids are indices into this vec.
    nodes: Vec<NodeData>,
    document_element: Option<NodeId>,
    doctype: Option<NodeId>,
}

impl Document {
    pub const NODE_TYPE: NodeType = NodeType::Document;

    /// Creates a document with no root element and an empty arena.
    pub fn empty() -> Self {
        Self {
            nodes: Vec::with_capacity(64),
            document_element: None,
            doctype: None,
        }
    }

    /// Creates the minimal skeleton document: a root `html` element holding
    /// one `body` child.
    pub fn new() -> Self {
        let mut doc = Self::empty();
        let html = doc.create_element("html");
        let body = doc.create_element("body");
        doc.attach(html, body);
        doc.document_element = Some(html);
        doc
    }

    /// Tokenizes `markup` with the given tokenizer and imports it as a whole
    /// document (root element, optional doctype).
    pub fn parse(markup: &str, tokenizer: &dyn Tokenize) -> Result<Self> {
        let tokens = tokenizer.tokenize(markup)?;
        tracing::debug!("tokenized markup into {} top-level tokens", tokens.len());
        let mut doc = Self::empty();
        doc.import_tokens(&tokens, None)?;
        Ok(doc)
    }

    /// Adopts `element` as the document's root. Adopting a second root is a
    /// fatal error.
    pub fn set_document_element(&mut self, element: NodeId) -> Result<()> {
        self.children_of(element, "set_document_element")?;
        if self.document_element.is_some() {
            let name = self.tag_name(element).unwrap_or_default().to_string();
            return Err(DomError::SecondRootElement { name });
        }
        self.document_element = Some(element);
        Ok(())
    }

    pub fn document_element(&self) -> Option<NodeId> {
        self.document_element
    }

    pub fn doctype(&self) -> Option<NodeId> {
        self.doctype
    }

    /// Total number of nodes allocated in the arena, attached or not.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // --- factories ---

    pub fn create_element(&mut self, name: &str) -> NodeId {
        self.alloc(NodeKind::Element {
            name: name.to_string(),
            attrs: AttrMap::default(),
            children: ChildList::default(),
        })
    }

    pub fn create_text_node(&mut self, data: &str) -> NodeId {
        self.alloc(NodeKind::Text {
            data: data.to_string(),
        })
    }

    pub fn create_comment(&mut self, data: &str) -> NodeId {
        self.alloc(NodeKind::Comment {
            data: data.to_string(),
        })
    }

    // --- node accessors ---

    pub fn node_type(&self, node: NodeId) -> Result<NodeType> {
        Ok(self.node(node)?.kind.node_type())
    }

    pub fn kind(&self, node: NodeId) -> Result<&NodeKind> {
        Ok(&self.node(node)?.kind)
    }

    /// Tag name for element nodes.
    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        match &self.nodes.get(node as usize)?.kind {
            NodeKind::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Raw character data for text and comment nodes.
    pub fn data(&self, node: NodeId) -> Option<&str> {
        match &self.nodes.get(node as usize)?.kind {
            NodeKind::Text { data } | NodeKind::Comment { data } => Some(data),
            _ => None,
        }
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node as usize)?.parent
    }

    /// The element's live child list.
    pub fn children(&self, element: NodeId) -> Result<&ChildList> {
        self.children_of(element, "children")
    }

    /// The element's live attribute map.
    pub fn attributes(&self, element: NodeId) -> Result<&AttrMap> {
        match &self.node(element)?.kind {
            NodeKind::Element { attrs, .. } => Ok(attrs),
            _ => Err(DomError::NotAnElement {
                op: "attributes",
                node: element,
            }),
        }
    }

    // --- attribute operations ---

    pub fn get_attribute(&self, element: NodeId, name: &str) -> Option<&str> {
        match &self.nodes.get(element as usize)?.kind {
            NodeKind::Element { attrs, .. } => attrs.get_named_item(name).map(|a| a.value()),
            _ => None,
        }
    }

    /// Sets an attribute. Always builds a brand-new attribute node, even
    /// when overwriting an existing name; the positional slot is kept.
    pub fn set_attribute(&mut self, element: NodeId, name: &str, value: &str) -> Result<()> {
        self.set_attribute_node(element, Attr::new(name, value))
    }

    pub fn has_attribute(&self, element: NodeId, name: &str) -> bool {
        self.get_attribute_node(element, name).is_some()
    }

    /// Removes the named attribute. Removing an absent name is not an error
    /// and returns `None`.
    pub fn remove_attribute(&mut self, element: NodeId, name: &str) -> Option<Attr> {
        match &mut self.nodes.get_mut(element as usize)?.kind {
            NodeKind::Element { attrs, .. } => attrs.remove_named_item(name),
            _ => None,
        }
    }

    pub fn get_attribute_node(&self, element: NodeId, name: &str) -> Option<&Attr> {
        match &self.nodes.get(element as usize)?.kind {
            NodeKind::Element { attrs, .. } => attrs.get_named_item(name),
            _ => None,
        }
    }

    pub fn set_attribute_node(&mut self, element: NodeId, attr: Attr) -> Result<()> {
        match &mut self.node_mut(element)?.kind {
            NodeKind::Element { attrs, .. } => {
                attrs.set_named_item(attr);
                Ok(())
            }
            _ => Err(DomError::NotAnElement {
                op: "set_attribute_node",
                node: element,
            }),
        }
    }

    pub fn id(&self, element: NodeId) -> Option<&str> {
        self.get_attribute(element, "id")
    }

    pub fn set_id(&mut self, element: NodeId, value: &str) -> Result<()> {
        self.set_attribute(element, "id", value)
    }

    pub fn class_name(&self, element: NodeId) -> Option<&str> {
        self.get_attribute(element, "class")
    }

    pub fn set_class_name(&mut self, element: NodeId, value: &str) -> Result<()> {
        self.set_attribute(element, "class", value)
    }

    // --- child mutation ---

    /// Appends `child` to `parent`'s list, detaching it from any previous
    /// parent first — a node is never in two places.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<NodeId> {
        self.children_of(parent, "append_child")?;
        self.node(child)?;
        self.detach(child, "append_child")?;
        self.children_mut(parent, "append_child")?.push(child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(child)
    }

    /// Splices `new_child` immediately before `reference`. A `None`
    /// reference appends. An unknown reference is a fatal error.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        new_child: NodeId,
        reference: Option<NodeId>,
    ) -> Result<NodeId> {
        let Some(reference) = reference else {
            return self.append_child(parent, new_child);
        };
        self.node(new_child)?;
        if self
            .children_of(parent, "insert_before")?
            .position(reference)
            .is_none()
        {
            return Err(DomError::ChildNotFound {
                op: "insert_before",
                node: reference,
                parent,
            });
        }
        self.detach(new_child, "insert_before")?;
        // re-locate after the detach: a same-parent move shifts positions
        let index = self
            .children_of(parent, "insert_before")?
            .position(reference)
            .ok_or(DomError::ChildNotFound {
                op: "insert_before",
                node: reference,
                parent,
            })?;
        self.children_mut(parent, "insert_before")?
            .insert_at(index, new_child);
        self.node_mut(new_child)?.parent = Some(parent);
        Ok(new_child)
    }

    /// Removes `node` from `parent`'s list and clears its parent link. A
    /// node that is not a child of `parent` is a fatal error.
    pub fn remove_child(&mut self, parent: NodeId, node: NodeId) -> Result<NodeId> {
        let index = self
            .children_of(parent, "remove_child")?
            .position(node)
            .ok_or(DomError::ChildNotFound {
                op: "remove_child",
                node,
                parent,
            })?;
        self.children_mut(parent, "remove_child")?.remove_at(index);
        self.node_mut(node)?.parent = None;
        Ok(node)
    }

    // --- traversal and queries ---

    /// Depth-first walk over the subtree rooted at `element`, the element
    /// itself included. Children are visited left to right, positionally
    /// against the live child list.
    pub fn walk(&self, element: NodeId, visitor: &mut dyn Visitor) -> Result<()> {
        self.children_of(element, "walk")?;
        if !visitor.enter_element(self, element) {
            return Ok(());
        }
        let mut index = 0;
        while let Some(child) = self.children_of(element, "walk")?.item(index) {
            match &self.node(child)?.kind {
                NodeKind::Element { .. } => self.walk(child, visitor)?,
                NodeKind::Text { .. } => visitor.visit_text(self, child),
                NodeKind::Comment { .. } => visitor.visit_comment(self, child),
                NodeKind::Doctype { .. } => {
                    return Err(DomError::UnsupportedNodeKind {
                        op: "walk",
                        node: child,
                        kind: NodeType::DocumentType,
                    })
                }
            }
            index += 1;
        }
        visitor.leave_element(self, element);
        Ok(())
    }

    /// Concatenated descendant text in document order, verbatim. Attribute
    /// values and comments contribute nothing.
    pub fn text_content(&self, element: NodeId) -> Result<String> {
        let mut run = TextRun {
            text: String::new(),
        };
        self.walk(element, &mut run)?;
        Ok(run.text)
    }

    /// First element in the subtree (pre-order, scope included) whose `id`
    /// attribute equals `id`.
    pub fn element_by_id(&self, scope: NodeId, id: &str) -> Result<Option<NodeId>> {
        let mut matches = IdMatches {
            id,
            matches: Vec::new(),
        };
        self.walk(scope, &mut matches)?;
        Ok(matches.matches.first().copied())
    }

    /// All elements in the subtree with the given tag name, in pre-order.
    /// The returned list is a snapshot taken now, not a live view.
    pub fn elements_by_tag_name(&self, scope: NodeId, name: &str) -> Result<Vec<NodeId>> {
        let mut matches = TagMatches {
            name,
            matches: Vec::new(),
        };
        self.walk(scope, &mut matches)?;
        Ok(matches.matches)
    }

    /// Document-wide id lookup; `None` on a rootless document.
    pub fn get_element_by_id(&self, id: &str) -> Result<Option<NodeId>> {
        match self.document_element {
            Some(root) => self.element_by_id(root, id),
            None => Ok(None),
        }
    }

    /// Document-wide tag search; empty on a rootless document.
    pub fn get_elements_by_tag_name(&self, name: &str) -> Result<Vec<NodeId>> {
        match self.document_element {
            Some(root) => self.elements_by_tag_name(root, name),
            None => Ok(Vec::new()),
        }
    }

    /// Text content of the first `title` element inside the first `head`
    /// element; empty string if any link in that chain is absent.
    pub fn title(&self) -> Result<String> {
        let heads = self.get_elements_by_tag_name("head")?;
        let Some(&head) = heads.first() else {
            return Ok(String::new());
        };
        let titles = self.elements_by_tag_name(head, "title")?;
        match titles.first() {
            Some(&title) => self.text_content(title),
            None => Ok(String::new()),
        }
    }

    /// First `body` element by tag search, if any.
    pub fn body(&self) -> Result<Option<NodeId>> {
        Ok(self.get_elements_by_tag_name("body")?.first().copied())
    }

    // --- serialization and import ---

    /// Full markup of one node: tag, attributes, children and close tag for
    /// elements; raw data for text; `<!--data-->` / `<!DOCTYPE name>` for
    /// comments and doctypes.
    pub fn outer_html(&self, node: NodeId) -> Result<String> {
        let mut out = String::new();
        serializer::write_node(self, node, &mut out)?;
        Ok(out)
    }

    /// Markup of the element's children only, concatenated in list order.
    pub fn inner_html(&self, element: NodeId) -> Result<String> {
        let mut out = String::new();
        let mut index = 0;
        while let Some(child) = self.children_of(element, "inner_html")?.item(index) {
            serializer::write_node(self, child, &mut out)?;
            index += 1;
        }
        Ok(out)
    }

    /// The root element's `inner_html`, or empty for a rootless document.
    pub fn document_inner_html(&self) -> Result<String> {
        match self.document_element {
            Some(root) => self.inner_html(root),
            None => Ok(String::new()),
        }
    }

    /// The root element's text content, or empty for a rootless document.
    pub fn document_inner_text(&self) -> Result<String> {
        match self.document_element {
            Some(root) => self.text_content(root),
            None => Ok(String::new()),
        }
    }

    /// Replaces the element's content: every existing child is detached
    /// (parent link cleared), then `markup` is tokenized and imported as the
    /// new children.
    pub fn set_inner_html(
        &mut self,
        element: NodeId,
        markup: &str,
        tokenizer: &dyn Tokenize,
    ) -> Result<()> {
        let old = self.children_mut(element, "set_inner_html")?.take_all();
        for child in old {
            self.node_mut(child)?.parent = None;
        }
        let tokens = tokenizer.tokenize(markup)?;
        tracing::trace!(
            "replacing children of node {} with {} top-level tokens",
            element,
            tokens.len()
        );
        self.import_tokens(&tokens, Some(element))
    }

    /// Converts a token tree into nodes.
    ///
    /// With a target element, every converted top-level token is appended as
    /// a child (directives convert to nothing and are skipped). Without one,
    /// the tokens describe a whole document: a tag establishes the root, a
    /// `!DOCTYPE` directive establishes the doctype, `?xml` is ignored, any
    /// other directive is fatal, and remaining top-level content is
    /// discarded.
    pub fn import_tokens(&mut self, tokens: &[Token], target: Option<NodeId>) -> Result<()> {
        if let Some(element) = target {
            self.children_of(element, "import_tokens")?;
            for token in tokens {
                if let Some(node) = TreeBuilder::new(self).convert(token)? {
                    self.attach(element, node);
                }
            }
            return Ok(());
        }

        for token in tokens {
            match token.kind {
                TokenKind::Directive => {
                    if token.name == "?xml" {
                        continue;
                    }
                    if token.name != "!DOCTYPE" {
                        return Err(DomError::UnsupportedDirective {
                            name: token.name.clone(),
                        });
                    }
                    if self.doctype.is_some() {
                        return Err(DomError::MultipleDoctypes);
                    }
                    // the declared name sits after the fixed `!DOCTYPE ` prefix
                    let name = token.data.get(9..).unwrap_or("").to_string();
                    let doctype = self.alloc(NodeKind::Doctype {
                        name,
                        entities: AttrMap::default(),
                        notations: AttrMap::default(),
                    });
                    self.doctype = Some(doctype);
                }
                TokenKind::Tag => {
                    if self.document_element.is_some() {
                        return Err(DomError::SecondRootElement {
                            name: token.name.clone(),
                        });
                    }
                    if let Some(root) = TreeBuilder::new(self).convert(token)? {
                        self.document_element = Some(root);
                    }
                }
                // Top-level text, comments, scripts and styles never reach
                // the tree.
                TokenKind::Script | TokenKind::Style | TokenKind::Text | TokenKind::Comment => {}
            }
        }
        Ok(())
    }

    // --- cloning and unsupported capabilities ---

    /// Clones a node into a new, parentless node in the same arena.
    /// Attributes are always cloned (ownerless copies); children only when
    /// `deep`.
    pub fn clone_node(&mut self, node: NodeId, deep: bool) -> Result<NodeId> {
        let snapshot = self.node(node)?.kind.clone();
        match snapshot {
            NodeKind::Element {
                name,
                attrs,
                children,
            } => {
                let clone = self.create_element(&name);
                for attr in attrs.iter() {
                    self.set_attribute_node(clone, attr.clone_node())?;
                }
                if deep {
                    for child in children.iter() {
                        let child_clone = self.clone_node(child, true)?;
                        self.attach(clone, child_clone);
                    }
                }
                Ok(clone)
            }
            NodeKind::Text { data } => Ok(self.create_text_node(&data)),
            NodeKind::Comment { data } => Ok(self.create_comment(&data)),
            NodeKind::Doctype { .. } => Err(DomError::UnsupportedNodeKind {
                op: "clone_node",
                node,
                kind: NodeType::DocumentType,
            }),
        }
    }

    /// This model has no event system.
    pub fn add_event_listener(&self, _element: NodeId) -> Result<()> {
        Err(DomError::Unsupported {
            op: "add_event_listener",
        })
    }

    /// Text splitting is unsupported.
    pub fn split_text(&mut self, _node: NodeId, _offset: usize) -> Result<NodeId> {
        Err(DomError::Unsupported { op: "split_text" })
    }

    // --- internals ---

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = self.nodes.len() as NodeId;
        self.nodes.push(NodeData::new(kind));
        if let NodeKind::Element { attrs, .. } = &mut self.nodes[id as usize].kind {
            attrs.set_owner(id);
        }
        id
    }

    fn node(&self, id: NodeId) -> Result<&NodeData> {
        self.nodes
            .get(id as usize)
            .ok_or(DomError::NodeNotFound(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut NodeData> {
        self.nodes
            .get_mut(id as usize)
            .ok_or(DomError::NodeNotFound(id))
    }

    fn children_of(&self, element: NodeId, op: &'static str) -> Result<&ChildList> {
        match &self.node(element)?.kind {
            NodeKind::Element { children, .. } => Ok(children),
            _ => Err(DomError::NotAnElement { op, node: element }),
        }
    }

    fn children_mut(&mut self, element: NodeId, op: &'static str) -> Result<&mut ChildList> {
        match &mut self.node_mut(element)?.kind {
            NodeKind::Element { children, .. } => Ok(children),
            _ => Err(DomError::NotAnElement { op, node: element }),
        }
    }

    /// Attaches a freshly allocated, parentless node; both ids come from
    /// this arena.
    pub(crate) fn attach(&mut self, parent: NodeId, child: NodeId) {
        if let NodeKind::Element { children, .. } = &mut self.nodes[parent as usize].kind {
            children.push(child);
        }
        self.nodes[child as usize].parent = Some(parent);
    }

    /// Removes a node from its current parent's list, if it has one.
    fn detach(&mut self, node: NodeId, op: &'static str) -> Result<()> {
        let Some(parent) = self.node(node)?.parent else {
            return Ok(());
        };
        let index = self
            .children_of(parent, op)
            .ok()
            .and_then(|children| children.position(node));
        let Some(index) = index else {
            return Err(DomError::ChildNotFound { op, node, parent });
        };
        self.children_mut(parent, op)?.remove_at(index);
        self.node_mut(node)?.parent = None;
        Ok(())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

struct TextRun {
    text: String,
}

impl Visitor for TextRun {
    fn visit_text(&mut self, doc: &Document, node: NodeId) {
        if let Some(data) = doc.data(node) {
            self.text.push_str(data);
        }
    }
}

struct IdMatches<'a> {
    id: &'a str,
    matches: Vec<NodeId>,
}

impl Visitor for IdMatches<'_> {
    fn enter_element(&mut self, doc: &Document, element: NodeId) -> bool {
        if doc.id(element) == Some(self.id) {
            self.matches.push(element);
        }
        true
    }
}

struct TagMatches<'a> {
    name: &'a str,
    matches: Vec<NodeId>,
}

impl Visitor for TagMatches<'_> {
    fn enter_element(&mut self, doc: &Document, element: NodeId) -> bool {
        if doc.tag_name(element) == Some(self.name) {
            self.matches.push(element);
        }
        true
    }
}
