//! Per-document id lookup table plus the namespace constant.
//!
//! The registry does not own tree placement. It holds shared handles so that a lookup returns
//! the very node that sits in the tree.

use crate::node::{ElementNode, ElementRef, TextNode};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// What [`Registry::register`] does when the id is already mapped to another element.
///
/// Neither policy fails: drawing code never expects an error from id assignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicateIdPolicy {
    /// The newest registration replaces the lookup entry; the old element is orphaned from
    /// lookup but stays in its tree.
    #[default]
    LastWins,
    /// The first registration keeps the lookup entry.
    FirstWins,
}

#[derive(Debug, Clone)]
pub struct Registry {
    namespace: String,
    policy: DuplicateIdPolicy,
    elements: FxHashMap<String, ElementRef>,
}

impl Registry {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self::with_policy(namespace, DuplicateIdPolicy::default())
    }

    pub fn with_policy(namespace: impl Into<String>, policy: DuplicateIdPolicy) -> Self {
        Self {
            namespace: namespace.into(),
            policy,
            elements: FxHashMap::default(),
        }
    }

    /// Allocates a fresh, unregistered element.
    pub fn create_element(
        &self,
        namespace: impl Into<String>,
        kind: impl Into<String>,
    ) -> ElementRef {
        ElementRef::new(ElementNode::with_namespace(namespace, kind))
    }

    pub fn create_text_node(&self, content: impl Into<String>) -> TextNode {
        TextNode::new(content)
    }

    /// Sets `element.id` and maps `id` to it according to the duplicate-id policy.
    pub fn register(&mut self, element: &ElementRef, id: &str) {
        element.borrow_mut().id = Some(id.to_string());

        match self.elements.get(id) {
            Some(existing) if existing.ptr_eq(element) => {}
            Some(_) => {
                tracing::debug!(id, policy = ?self.policy, "duplicate element id");
                if self.policy == DuplicateIdPolicy::LastWins {
                    self.elements.insert(id.to_string(), element.clone());
                }
            }
            None => {
                self.elements.insert(id.to_string(), element.clone());
            }
        }
    }

    pub fn lookup(&self, id: &str) -> Option<ElementRef> {
        self.elements.get(id).cloned()
    }

    /// Empties the id table. Tree data outside the registry is untouched.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn policy(&self) -> DuplicateIdPolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.elements.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}
