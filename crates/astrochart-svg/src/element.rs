//! Element and text facades: a DOM-shaped API over [`ElementRef`] data.

use crate::node::{Attributes, ElementRef, Node, TextNode};
use crate::registry::Registry;
use std::cell::RefCell;
use std::rc::Rc;

/// The element half of the document API that chart drawing code is written against.
pub trait ElementApi: Sized {
    /// The node's own namespace, else the owning registry's.
    fn namespace_uri(&self) -> String;
    /// The node's `id` field, else `attributes["id"]`, else empty.
    fn id(&self) -> String;
    fn set_attribute(&self, name: &str, value: &str);
    fn get_attribute(&self, name: &str) -> Option<String>;
    fn append_child<'a>(&self, child: impl Into<Child<'a>>);
    fn remove_child<'a>(&self, child: impl Into<Child<'a>>);
    fn query_selector_all(&self, selector: &str) -> Vec<Self>;
}

/// Borrowed argument to [`ElementApi::append_child`] / [`ElementApi::remove_child`].
#[derive(Debug, Clone, Copy)]
pub enum Child<'a> {
    Element(&'a Element),
    Text(&'a Text),
}

impl<'a> From<&'a Element> for Child<'a> {
    fn from(value: &'a Element) -> Self {
        Child::Element(value)
    }
}

impl<'a> From<&'a Text> for Child<'a> {
    fn from(value: &'a Text) -> Self {
        Child::Text(value)
    }
}

impl Child<'_> {
    fn to_node(self) -> Node {
        match self {
            Child::Element(el) => Node::Element(el.node.clone()),
            Child::Text(text) => Node::Text(text.node.clone()),
        }
    }
}

/// The two selector grammars `query_selector_all` understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector<'a> {
    /// `#<id>`
    Id(&'a str),
    /// `<tag>`
    Kind(&'a str),
}

impl<'a> Selector<'a> {
    pub fn parse(selector: &'a str) -> Self {
        match selector.strip_prefix('#') {
            Some(id) => Selector::Id(id),
            None => Selector::Kind(selector),
        }
    }
}

/// Facade over one element node plus the document's shared registry.
#[derive(Clone)]
pub struct Element {
    node: ElementRef,
    registry: Rc<RefCell<Registry>>,
}

impl std::fmt::Debug for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Element").field("node", &self.node).finish()
    }
}

impl Element {
    pub(crate) fn new(node: ElementRef, registry: Rc<RefCell<Registry>>) -> Self {
        Self { node, registry }
    }

    /// The underlying node handle (shared, not copied).
    pub fn node(&self) -> &ElementRef {
        &self.node
    }

    pub fn kind(&self) -> String {
        self.node.kind()
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.node.borrow().attributes.contains_key(name)
    }

    /// Removes an attribute. Removing `id` also clears the node's `id` field; a registry entry
    /// pointing at this node is left in place.
    pub fn remove_attribute(&self, name: &str) {
        let mut node = self.node.borrow_mut();
        node.attributes.shift_remove(name);
        if name == "id" {
            node.id = None;
        }
    }

    pub fn attributes(&self) -> Attributes {
        self.node.borrow().attributes.clone()
    }

    pub fn children_len(&self) -> usize {
        self.node.borrow().children.len()
    }

    pub fn text_content(&self) -> String {
        self.node.text_content()
    }

    pub fn query_selector(&self, selector: &str) -> Option<Element> {
        self.query_selector_all(selector).into_iter().next()
    }

    fn wrap(&self, node: ElementRef) -> Element {
        Element::new(node, Rc::clone(&self.registry))
    }

    fn effective_id(node: &ElementRef) -> Option<String> {
        let node = node.borrow();
        node.id
            .clone()
            .or_else(|| node.attributes.get("id").cloned())
    }
}

impl ElementApi for Element {
    fn namespace_uri(&self) -> String {
        if let Some(ns) = self.node.borrow().namespace.clone() {
            return ns;
        }
        self.registry.borrow().namespace().to_string()
    }

    fn id(&self) -> String {
        Self::effective_id(&self.node).unwrap_or_default()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.node
            .borrow_mut()
            .attributes
            .insert(name.to_string(), value.to_string());
        if name == "id" {
            self.registry.borrow_mut().register(&self.node, value);
        }
    }

    fn get_attribute(&self, name: &str) -> Option<String> {
        self.node.borrow().attributes.get(name).cloned()
    }

    fn append_child<'a>(&self, child: impl Into<Child<'a>>) {
        let child = child.into();
        if let Child::Element(el) = child {
            if el.node.contains(&self.node) {
                tracing::warn!(
                    parent = %self.node.kind(),
                    child = %el.node.kind(),
                    "refusing to append an element into its own subtree"
                );
                return;
            }
        }
        self.node.borrow_mut().children.push(child.to_node());
    }

    fn remove_child<'a>(&self, child: impl Into<Child<'a>>) {
        let target = child.into().to_node();
        let index = self
            .node
            .borrow()
            .children
            .iter()
            .position(|existing| *existing == target);
        if let Some(index) = index {
            self.node.borrow_mut().children.remove(index);
        }
    }

    fn query_selector_all(&self, selector: &str) -> Vec<Element> {
        let mut out = Vec::new();
        match Selector::parse(selector) {
            Selector::Kind(kind) => {
                self.node.for_each_element(&mut |el| {
                    if el.borrow().kind == kind {
                        out.push(self.wrap(el.clone()));
                    }
                });
            }
            Selector::Id(id) => {
                // The registered element is authoritative while it still carries the id; otherwise
                // the first node carrying it wins.
                let registered = self
                    .registry
                    .borrow()
                    .lookup(id)
                    .filter(|reg| Self::effective_id(reg).as_deref() == Some(id));
                let mut found: Option<ElementRef> = None;
                self.node.for_each_element(&mut |el| {
                    if found.is_some() {
                        return;
                    }
                    let hit = match &registered {
                        Some(reg) => reg.ptr_eq(el),
                        None => Self::effective_id(el).as_deref() == Some(id),
                    };
                    if hit {
                        found = Some(el.clone());
                    }
                });
                out.extend(found.map(|el| self.wrap(el)));
            }
        }
        out
    }
}

/// Facade over one text node. Text nodes are values; appending copies them into the parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    node: TextNode,
}

impl Text {
    pub fn new(node: TextNode) -> Self {
        Self { node }
    }

    pub fn node(&self) -> &TextNode {
        &self.node
    }

    pub fn content(&self) -> &str {
        &self.node.content
    }
}
