#![forbid(unsafe_code)]

//! Headless virtual SVG document model for astrological charts.
//!
//! Drawing code builds a tree through a DOM-shaped facade ([`Document`], [`Element`], [`Text`])
//! with no rendering surface behind it. The finished tree is plain node data ([`ElementRef`])
//! that serializes to:
//! - component source for a native SVG toolkit ([`to_component_source`])
//! - SVG markup ([`to_svg_markup`])
//! - a native component tree ([`render_native`])
//! - raw JSON ([`to_json`])
//!
//! Everything is single-threaded and synchronous. Lookups that miss return `None`; tree edits
//! that cannot apply are no-ops.

pub mod attr;
pub mod component;
pub mod config;
pub mod document;
pub mod element;
pub mod error;
pub mod extract;
pub mod json;
pub mod markup;
pub mod native;
pub mod node;
pub mod registry;

pub use attr::{AttributeTable, component_name, kebab_to_camel};
pub use component::{ComponentSourceOptions, to_component_source, to_component_source_with};
pub use config::{MAX_INDENT_WIDTH, RenderConfig};
pub use document::{Document, DocumentApi};
pub use element::{Child, Element, ElementApi, Selector, Text};
pub use error::{Error, Result};
pub use extract::{extract_text, extract_tree};
pub use json::{from_json, from_json_value, to_json, to_json_value};
pub use markup::{SvgMarkupOptions, to_svg_markup};
pub use native::{
    Diagnostic, NativeChild, NativeComponent, NativeElement, NativeRenderOptions, NativeTree,
    PropValue, render_native,
};
pub use node::{Attributes, ElementNode, ElementRef, Node, TextNode};
pub use registry::{DuplicateIdPolicy, Registry};

/// Namespace used for elements created without an explicit one.
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
