//! Unwraps facades back to raw node data for serializers and native adapters.

use crate::element::{Element, Text};
use crate::node::{ElementRef, TextNode};

/// Returns the facade's node handle. No copy is made: later mutation through any facade is
/// visible through the returned value.
pub fn extract_tree(element: &Element) -> ElementRef {
    element.node().clone()
}

pub fn extract_text(text: &Text) -> TextNode {
    text.node().clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Document, DocumentApi};
    use crate::element::ElementApi;
    use crate::node::{ElementNode, Node};

    #[test]
    fn extraction_matches_the_tree_built_through_facades() {
        let doc = Document::new();
        let svg = doc.create_element("svg");
        svg.set_attribute("width", "800");
        let g = doc.create_element("g");
        g.set_attribute("stroke", "#000");
        let label = doc.create_element("text");
        label.append_child(&doc.create_text_node("Sun"));
        g.append_child(&label);
        svg.append_child(&g);

        let mut expected_label = ElementNode::with_namespace(crate::SVG_NAMESPACE, "text");
        expected_label.children.push(Node::Text(TextNode::new("Sun")));
        let mut expected_g = ElementNode::with_namespace(crate::SVG_NAMESPACE, "g");
        expected_g
            .attributes
            .insert("stroke".to_string(), "#000".to_string());
        expected_g
            .children
            .push(Node::Element(ElementRef::new(expected_label)));
        let mut expected = ElementNode::with_namespace(crate::SVG_NAMESPACE, "svg");
        expected
            .attributes
            .insert("width".to_string(), "800".to_string());
        expected.children.push(Node::Element(ElementRef::new(expected_g)));

        assert_eq!(extract_tree(&svg), ElementRef::new(expected));
    }

    #[test]
    fn extraction_is_idempotent_and_shared() {
        let doc = Document::new();
        let g = doc.create_element("g");
        g.append_child(&doc.create_element("circle"));

        let first = extract_tree(&g);
        let second = extract_tree(&g);
        assert_eq!(first, second);
        assert!(first.ptr_eq(&second));

        g.set_attribute("fill", "none");
        assert_eq!(
            first.borrow().attributes.get("fill").map(String::as_str),
            Some("none")
        );
    }

    #[test]
    fn extracted_id_lookup_is_reference_equal() {
        let doc = Document::new();
        let el = doc.create_element("circle");
        el.set_attribute("id", "moon");
        let found = doc.get_element_by_id("moon").unwrap();
        assert!(extract_tree(&found).ptr_eq(&extract_tree(&el)));
    }

    #[test]
    fn text_extraction_copies_content() {
        let doc = Document::new();
        let text = doc.create_text_node("Venus");
        assert_eq!(extract_text(&text), TextNode::new("Venus"));
    }
}
