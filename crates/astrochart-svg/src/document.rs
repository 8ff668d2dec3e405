//! Document facade: element factory, lazily created `body`, id lookup.

use crate::SVG_NAMESPACE;
use crate::element::{Element, ElementApi, Text};
use crate::node::ElementRef;
use crate::registry::{DuplicateIdPolicy, Registry};
use std::cell::{OnceCell, RefCell};
use std::rc::Rc;

/// The document half of the API that chart drawing code is written against.
pub trait DocumentApi {
    type Element: ElementApi;
    type Text;

    /// Memoized root container; created on first access, never registered under an id.
    fn body(&self) -> Self::Element;
    fn create_element_ns(&self, namespace: &str, kind: &str) -> Self::Element;
    /// Like [`DocumentApi::create_element_ns`] in the document's own namespace.
    fn create_element(&self, kind: &str) -> Self::Element;
    fn create_text_node(&self, content: &str) -> Self::Text;
    fn get_element_by_id(&self, id: &str) -> Option<Self::Element>;
}

/// A headless document. Owns the registry; every facade it hands out shares it.
///
/// Single-threaded by construction (`Rc`/`RefCell`); callers needing cross-thread use must
/// build one document per thread or serialize access themselves.
pub struct Document {
    registry: Rc<RefCell<Registry>>,
    body: OnceCell<Element>,
    root: RefCell<Option<ElementRef>>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registry = self.registry.borrow();
        f.debug_struct("Document")
            .field("namespace", &registry.namespace())
            .field("registered", &registry.len())
            .field("has_body", &self.body.get().is_some())
            .field("has_root", &self.root.borrow().is_some())
            .finish()
    }
}

impl Document {
    pub fn new() -> Self {
        Self::with_namespace(SVG_NAMESPACE)
    }

    pub fn with_namespace(namespace: impl Into<String>) -> Self {
        Self::from_registry(Registry::new(namespace))
    }

    pub fn with_policy(policy: DuplicateIdPolicy) -> Self {
        Self::from_registry(Registry::with_policy(SVG_NAMESPACE, policy))
    }

    pub fn from_registry(registry: Registry) -> Self {
        Self {
            registry: Rc::new(RefCell::new(registry)),
            body: OnceCell::new(),
            root: RefCell::new(None),
        }
    }

    pub fn namespace(&self) -> String {
        self.registry.borrow().namespace().to_string()
    }

    pub fn registered_ids(&self) -> Vec<String> {
        self.registry
            .borrow()
            .ids()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Designates the chart's paper element.
    pub fn set_root(&self, element: &Element) {
        *self.root.borrow_mut() = Some(element.node().clone());
    }

    pub fn root(&self) -> Option<Element> {
        self.root.borrow().clone().map(|node| self.wrap(node))
    }

    /// Forgets every id registration and the root designation. Node data is untouched.
    pub fn clear(&self) {
        self.registry.borrow_mut().clear();
        *self.root.borrow_mut() = None;
    }

    /// Takes an existing tree under this document: every element carrying an id (its `id`
    /// field, else its `id` attribute) is registered in pre-order.
    pub fn adopt(&self, tree: ElementRef) -> Element {
        let mut registry = self.registry.borrow_mut();
        tree.for_each_element(&mut |el| {
            let id = {
                let node = el.borrow();
                node.id.clone().or_else(|| node.attributes.get("id").cloned())
            };
            if let Some(id) = id {
                registry.register(el, &id);
            }
        });
        drop(registry);
        self.wrap(tree)
    }

    fn wrap(&self, node: ElementRef) -> Element {
        Element::new(node, Rc::clone(&self.registry))
    }
}

impl DocumentApi for Document {
    type Element = Element;
    type Text = Text;

    fn body(&self) -> Element {
        self.body
            .get_or_init(|| {
                let node = {
                    let registry = self.registry.borrow();
                    registry.create_element(registry.namespace(), "body")
                };
                self.wrap(node)
            })
            .clone()
    }

    fn create_element_ns(&self, namespace: &str, kind: &str) -> Element {
        let node = self.registry.borrow().create_element(namespace, kind);
        self.wrap(node)
    }

    fn create_element(&self, kind: &str) -> Element {
        let namespace = self.namespace();
        self.create_element_ns(&namespace, kind)
    }

    fn create_text_node(&self, content: &str) -> Text {
        Text::new(self.registry.borrow().create_text_node(content))
    }

    fn get_element_by_id(&self, id: &str) -> Option<Element> {
        let found = self.registry.borrow().lookup(id);
        found.map(|node| self.wrap(node))
    }
}
