//! SVG markup serializer: the tree as XML text, every attribute kept.

use crate::config::indent_columns;
use crate::node::{ElementRef, Node};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvgMarkupOptions {
    /// One element per line, indented. Elements holding text stay on one line.
    pub pretty: bool,
    /// Clamped to [`crate::MAX_INDENT_WIDTH`].
    pub indent_width: usize,
    /// Prefix the output with `<?xml ...?>`.
    pub xml_declaration: bool,
}

impl Default for SvgMarkupOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            indent_width: 2,
            xml_declaration: false,
        }
    }
}

pub fn to_svg_markup(root: &ElementRef, options: &SvgMarkupOptions) -> String {
    tracing::trace!(kind = %root.kind(), pretty = options.pretty, "serializing svg markup");
    let mut out = String::new();
    if options.xml_declaration {
        out.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        if options.pretty {
            out.push('\n');
        }
    }
    write_element(&mut out, root, None, 0, options);
    out
}

fn write_element(
    out: &mut String,
    el: &ElementRef,
    parent_ns: Option<&str>,
    level: usize,
    options: &SvgMarkupOptions,
) {
    let node = el.borrow();
    let pretty = options.pretty;
    if pretty {
        push_indent(out, level, options);
    }

    let _ = write!(out, "<{}", node.kind);
    // Children without a namespace inherit the parent's.
    let ns = node.namespace.as_deref().or(parent_ns);
    if let Some(ns) = node.namespace.as_deref() {
        if parent_ns != Some(ns) && !node.attributes.contains_key("xmlns") {
            let _ = write!(out, r#" xmlns="{}""#, EscapeXml(ns));
        }
    }
    for (key, value) in &node.attributes {
        let _ = write!(out, r#" {key}="{}""#, EscapeXml(value));
    }

    if node.children.is_empty() {
        out.push_str("/>");
        return;
    }
    out.push('>');

    let has_text = node.children.iter().any(|c| matches!(c, Node::Text(_)));
    let child_options;
    let options = if pretty && has_text {
        child_options = SvgMarkupOptions {
            pretty: false,
            ..options.clone()
        };
        &child_options
    } else {
        options
    };

    for child in &node.children {
        if options.pretty {
            out.push('\n');
        }
        match child {
            Node::Element(child) => write_element(out, child, ns, level.saturating_add(1), options),
            Node::Text(text) => {
                let _ = write!(out, "{}", EscapeXml(&text.content));
            }
        }
    }
    if options.pretty {
        out.push('\n');
        push_indent(out, level, options);
    }
    let _ = write!(out, "</{}>", node.kind);
}

fn push_indent(out: &mut String, level: usize, options: &SvgMarkupOptions) {
    let columns = indent_columns(level, options.indent_width);
    out.extend(std::iter::repeat_n(' ', columns));
}

struct EscapeXml<'a>(&'a str);

impl std::fmt::Display for EscapeXml<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = self.0;
        let mut start = 0usize;
        for (i, &b) in text.as_bytes().iter().enumerate() {
            let esc = match b {
                b'&' => "&amp;",
                b'<' => "&lt;",
                b'>' => "&gt;",
                b'"' => "&quot;",
                b'\'' => "&#39;",
                _ => continue,
            };
            if start < i {
                f.write_str(&text[start..i])?;
            }
            f.write_str(esc)?;
            start = i + 1;
        }
        if start < text.len() {
            f.write_str(&text[start..])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SVG_NAMESPACE;
    use crate::document::{Document, DocumentApi};
    use crate::element::ElementApi;
    use crate::extract::extract_tree;
    use crate::node::{ElementNode, TextNode};
    use pretty_assertions::assert_eq;

    fn paper() -> (Document, crate::element::Element) {
        let doc = Document::new();
        let svg = doc.create_element("svg");
        svg.set_attribute("width", "800");
        svg.set_attribute("height", "800");
        let g = doc.create_element("g");
        g.set_attribute("transform", "rotate(30 400 400)");
        let text = doc.create_element("text");
        text.set_attribute("font-size", "12");
        text.append_child(&doc.create_text_node("Sun & Moon"));
        g.append_child(&text);
        g.append_child(&doc.create_element("circle"));
        svg.append_child(&g);
        (doc, svg)
    }

    #[test]
    fn compact_markup_keeps_every_attribute() {
        let (_doc, svg) = paper();
        assert_eq!(
            to_svg_markup(&extract_tree(&svg), &SvgMarkupOptions::default()),
            format!(
                r#"<svg xmlns="{SVG_NAMESPACE}" width="800" height="800"><g transform="rotate(30 400 400)"><text font-size="12">Sun &amp; Moon</text><circle/></g></svg>"#
            )
        );
    }

    #[test]
    fn pretty_markup_keeps_text_inline() {
        let (_doc, svg) = paper();
        let options = SvgMarkupOptions {
            pretty: true,
            xml_declaration: true,
            ..SvgMarkupOptions::default()
        };
        let expected = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
<svg xmlns=\"{SVG_NAMESPACE}\" width=\"800\" height=\"800\">\n\
  <g transform=\"rotate(30 400 400)\">\n\
    <text font-size=\"12\">Sun &amp; Moon</text>\n\
    <circle/>\n\
  </g>\n\
</svg>"
        );
        assert_eq!(to_svg_markup(&extract_tree(&svg), &options), expected);
    }

    #[test]
    fn pretty_markup_clamps_huge_indent_width() {
        let (_doc, svg) = paper();
        let options = SvgMarkupOptions {
            pretty: true,
            indent_width: usize::MAX,
            ..SvgMarkupOptions::default()
        };
        let out = to_svg_markup(&extract_tree(&svg), &options);

        let pad = " ".repeat(crate::MAX_INDENT_WIDTH);
        assert!(out.contains(&format!("\n{pad}<g transform=")));
        assert!(out.contains(&format!("\n{pad}{pad}<circle/>")));
        assert!(out.ends_with("\n</svg>"));
    }

    #[test]
    fn namespace_changes_are_declared() {
        let root = ElementRef::new(ElementNode::new("svg"));
        let foreign = ElementRef::new(ElementNode::with_namespace("urn:x", "meta"));
        foreign
            .borrow_mut()
            .children
            .push(TextNode::new("a<b").into());
        root.borrow_mut().children.push(foreign.into());

        assert_eq!(
            to_svg_markup(&root, &SvgMarkupOptions::default()),
            r#"<svg><meta xmlns="urn:x">a&lt;b</meta></svg>"#
        );
    }

    #[test]
    fn explicit_xmlns_attribute_is_not_duplicated() {
        let doc = Document::new();
        let svg = doc.create_element("svg");
        svg.set_attribute("xmlns", SVG_NAMESPACE);
        assert_eq!(
            to_svg_markup(&extract_tree(&svg), &SvgMarkupOptions::default()),
            format!(r#"<svg xmlns="{SVG_NAMESPACE}"/>"#)
        );
    }
}
