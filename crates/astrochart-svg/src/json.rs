//! Introspectable raw-data form of a tree.

use crate::node::{ElementRef, Node};
use crate::{Error, Result};
use serde::Deserialize as _;

pub fn to_json(root: &ElementRef, pretty: bool) -> Result<String> {
    let out = if pretty {
        serde_json::to_string_pretty(root)?
    } else {
        serde_json::to_string(root)?
    };
    Ok(out)
}

pub fn to_json_value(root: &ElementRef) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(root)?)
}

/// Parses a raw tree. The root must be an element.
///
/// Nesting is bounded by `serde_json`'s recursion limit (128 levels, each element costing
/// about two), so trees nested deeper than roughly 60 elements are rejected with
/// [`Error::Json`]. Chart trees stay well under this.
pub fn from_json(text: &str) -> Result<ElementRef> {
    match serde_json::from_str::<Node>(text)? {
        Node::Element(root) => Ok(root),
        Node::Text(_) => Err(Error::InvalidTree {
            message: "root must be an element, found a text node".to_string(),
        }),
    }
}

/// Like [`from_json`], for an already parsed value.
pub fn from_json_value(value: &serde_json::Value) -> Result<ElementRef> {
    match Node::deserialize(value)? {
        Node::Element(root) => Ok(root),
        Node::Text(_) => Err(Error::InvalidTree {
            message: "root must be an element, found a text node".to_string(),
        }),
    }
}
