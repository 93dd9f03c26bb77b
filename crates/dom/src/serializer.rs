//! Tree-to-markup serialization.
//!
//! Output is reconstructed purely from current tree state; round trips are
//! equivalent trees, not byte-identical text. No escaping is performed —
//! text and attribute values go out verbatim.

use crate::document::Document;
use crate::error::Result;
use crate::types::{NodeId, NodeKind};

/// Writes the full markup of one node (tag, attributes, children, close tag
/// for elements) into `out`.
pub fn write_node(doc: &Document, node: NodeId, out: &mut String) -> Result<()> {
    match doc.kind(node)? {
        NodeKind::Element {
            name,
            attrs,
            children,
        } => {
            out.push('<');
            out.push_str(name);
            attrs.write_markup(out);
            out.push('>');
            for child in children.iter() {
                write_node(doc, child, out)?;
            }
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
        NodeKind::Text { data } => out.push_str(data),
        NodeKind::Comment { data } => {
            out.push_str("<!--");
            out.push_str(data);
            out.push_str("-->");
        }
        NodeKind::Doctype { name, .. } => {
            out.push_str("<!DOCTYPE ");
            out.push_str(name);
            out.push('>');
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;

    #[test]
    fn test_element_markup() {
        let mut doc = Document::empty();
        let div = doc.create_element("div");
        doc.set_attribute(div, "id", "x").unwrap();
        doc.set_attribute(div, "class", "row").unwrap();
        let text = doc.create_text_node("Hello");
        doc.append_child(div, text).unwrap();

        assert_eq!(
            doc.outer_html(div).unwrap(),
            "<div id=\"x\" class=\"row\">Hello</div>"
        );
        assert_eq!(doc.inner_html(div).unwrap(), "Hello");
    }

    #[test]
    fn test_comment_markup() {
        let mut doc = Document::empty();
        let comment = doc.create_comment(" keep me ");
        assert_eq!(doc.outer_html(comment).unwrap(), "<!-- keep me -->");
    }

    #[test]
    fn test_no_escaping_anywhere() {
        let mut doc = Document::empty();
        let div = doc.create_element("div");
        doc.set_attribute(div, "title", "say \"hi\" & bye").unwrap();
        let text = doc.create_text_node("1 < 2 & 3");
        doc.append_child(div, text).unwrap();

        assert_eq!(
            doc.outer_html(div).unwrap(),
            "<div title=\"say \"hi\" & bye\">1 < 2 & 3</div>"
        );
    }

    #[test]
    fn test_doctype_markup() {
        let mut doc = Document::empty();
        doc.import_tokens(
            &[crate::Token::directive("!DOCTYPE", "!DOCTYPE html")],
            None,
        )
        .unwrap();

        let doctype = doc.doctype().unwrap();
        assert_eq!(doc.outer_html(doctype).unwrap(), "<!DOCTYPE html>");
    }

    #[test]
    fn test_empty_element_markup() {
        let mut doc = Document::empty();
        let br = doc.create_element("br");
        assert_eq!(doc.outer_html(br).unwrap(), "<br></br>");
    }
}
