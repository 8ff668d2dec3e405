//! Plain node records for the virtual SVG tree.
//!
//! Element nodes are shared handles ([`ElementRef`]): the facade that built a node, the
//! registry entry that looks it up, and any tree extracted from it all point at the same
//! data. Text nodes are plain values.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

/// Ordered attribute map. Insertion order is kept so serializers are deterministic.
pub type Attributes = IndexMap<String, String>;

/// One markup element.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ElementNode {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub children: Vec<Node>,
    /// Denormalized copy of `attributes["id"]`, written by registry registration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(
        rename = "namespaceURI",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub namespace: Option<String>,
}

impl ElementNode {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    pub fn with_namespace(namespace: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            namespace: Some(namespace.into()),
            ..Self::default()
        }
    }

    /// Element children only, in document order.
    pub fn element_children(&self) -> impl Iterator<Item = &ElementRef> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// The first direct text child, if any.
    pub fn first_text(&self) -> Option<&TextNode> {
        self.children.iter().find_map(Node::as_text)
    }
}

/// Leaf node holding literal text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "RawText", try_from = "RawText")]
pub struct TextNode {
    pub content: String,
}

impl TextNode {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

// Wire shape of a text node: `{"type": "text", "content": "..."}`. `type` is optional on input.
#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawText {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
    content: String,
}

impl From<TextNode> for RawText {
    fn from(value: TextNode) -> Self {
        Self {
            kind: Some("text".to_string()),
            content: value.content,
        }
    }
}

impl TryFrom<RawText> for TextNode {
    type Error = String;

    fn try_from(value: RawText) -> Result<Self, Self::Error> {
        match value.kind.as_deref() {
            None | Some("text") => Ok(Self {
                content: value.content,
            }),
            Some(other) => Err(format!("text node with unexpected type `{other}`")),
        }
    }
}

/// A child slot: either an element or a text leaf.
///
/// On the wire an object carrying `content` is a text node; anything else is an element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Text(TextNode),
    Element(ElementRef),
}

impl Node {
    pub fn as_element(&self) -> Option<&ElementRef> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextNode> {
        match self {
            Node::Text(text) => Some(text),
            Node::Element(_) => None,
        }
    }
}

impl From<ElementRef> for Node {
    fn from(value: ElementRef) -> Self {
        Node::Element(value)
    }
}

impl From<TextNode> for Node {
    fn from(value: TextNode) -> Self {
        Node::Text(value)
    }
}

/// Shared, interior-mutable handle to an [`ElementNode`].
///
/// `Clone` is shallow (another handle to the same node). `==` is structural; use
/// [`ElementRef::ptr_eq`] for identity.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementRef(Rc<RefCell<ElementNode>>);

impl ElementRef {
    pub fn new(node: ElementNode) -> Self {
        Self(Rc::new(RefCell::new(node)))
    }

    pub fn borrow(&self) -> Ref<'_, ElementNode> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, ElementNode> {
        self.0.borrow_mut()
    }

    pub fn ptr_eq(&self, other: &ElementRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn kind(&self) -> String {
        self.borrow().kind.clone()
    }

    /// Calls `visit` for this element and every descendant element, pre-order.
    pub fn for_each_element(&self, visit: &mut dyn FnMut(&ElementRef)) {
        visit(self);
        let node = self.borrow();
        for child in node.element_children() {
            child.for_each_element(visit);
        }
    }

    /// True when `other` is this element or one of its descendants (by identity).
    pub fn contains(&self, other: &ElementRef) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        self.borrow()
            .element_children()
            .any(|child| child.contains(other))
    }

    /// Concatenated text of all descendant text nodes, pre-order.
    pub fn text_content(&self) -> String {
        fn collect(el: &ElementRef, out: &mut String) {
            for child in &el.borrow().children {
                match child {
                    Node::Text(text) => out.push_str(&text.content),
                    Node::Element(child) => collect(child, out),
                }
            }
        }

        let mut out = String::new();
        collect(self, &mut out);
        out
    }

    /// Number of descendant nodes (elements and text), not counting `self`.
    pub fn descendant_count(&self) -> usize {
        self.borrow()
            .children
            .iter()
            .map(|child| match child {
                Node::Text(_) => 1,
                Node::Element(el) => 1 + el.descendant_count(),
            })
            .sum()
    }
}

impl From<ElementNode> for ElementRef {
    fn from(value: ElementNode) -> Self {
        Self::new(value)
    }
}

impl PartialEq for ElementRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.borrow() == *other.borrow()
    }
}

impl Eq for ElementRef {}

impl fmt::Debug for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(node) => node.fmt(f),
            Err(_) => f.write_str("ElementRef(<mutably borrowed>)"),
        }
    }
}
