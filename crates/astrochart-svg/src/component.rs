//! Component-source serializer: renders a tree as JSX-style source for a native SVG toolkit.
//!
//! Output is deterministic and always well-nested. Indentation is cosmetic.

use crate::attr::{AttributeTable, component_name};
use crate::config::indent_columns;
use crate::node::{ElementRef, Node};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt::Write as _;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentSourceOptions {
    /// Spaces per nesting level, clamped to [`crate::MAX_INDENT_WIDTH`].
    pub indent_width: usize,
    pub attributes: AttributeTable,
}

impl Default for ComponentSourceOptions {
    fn default() -> Self {
        Self {
            indent_width: 2,
            attributes: AttributeTable::default(),
        }
    }
}

/// Renders `node` starting at nesting level `indent` with default options.
pub fn to_component_source(node: &ElementRef, indent: usize) -> String {
    to_component_source_with(node, indent, &ComponentSourceOptions::default())
}

pub fn to_component_source_with(
    node: &ElementRef,
    indent: usize,
    options: &ComponentSourceOptions,
) -> String {
    tracing::trace!(kind = %node.kind(), indent, "serializing component source");
    let mut out = String::new();
    write_element(&mut out, node, indent, options);
    out
}

fn write_element(
    out: &mut String,
    node: &ElementRef,
    level: usize,
    options: &ComponentSourceOptions,
) {
    let node = node.borrow();
    let pad = " ".repeat(indent_columns(level, options.indent_width));
    let name = component_name(&node.kind);

    // Keys that translate to the same prop collapse; the last value wins.
    let mut props: IndexMap<Cow<'_, str>, &str> = IndexMap::new();
    for (key, value) in &node.attributes {
        if let Some(prop) = options.attributes.translate(key) {
            props.insert(prop, value.as_str());
        }
    }

    let _ = write!(out, "{pad}<{name}");
    for (prop, value) in &props {
        let _ = write!(out, " {prop}=\"{}\"", escape_prop_value(value));
    }

    if node.children.is_empty() {
        out.push_str(" />");
        return;
    }

    out.push_str(">\n");
    let child_level = level.saturating_add(1);
    let child_pad = " ".repeat(indent_columns(child_level, options.indent_width));
    for child in &node.children {
        match child {
            Node::Element(el) => write_element(out, el, child_level, options),
            Node::Text(text) => {
                let _ = write!(out, "{child_pad}{{{}}}", string_literal(&text.content));
            }
        }
        out.push('\n');
    }
    let _ = write!(out, "{pad}</{name}>");
}

fn escape_prop_value(value: &str) -> Cow<'_, str> {
    if value.contains('"') {
        Cow::Owned(value.replace('"', "&quot;"))
    } else {
        Cow::Borrowed(value)
    }
}

fn string_literal(content: &str) -> String {
    // JSON string syntax is valid JS string syntax.
    serde_json::Value::String(content.to_string()).to_string()
}
