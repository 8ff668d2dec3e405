//! Name translation tables shared by the component-source and native serializers.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Known SVG tag -> component name.
pub const COMPONENT_NAMES: &[(&str, &str)] = &[
    ("svg", "Svg"),
    ("g", "G"),
    ("path", "Path"),
    ("line", "Line"),
    ("circle", "Circle"),
    ("rect", "Rect"),
    ("text", "Text"),
];

/// Attribute renames applied before the generic kebab-case fallback.
pub const DEFAULT_RENAMES: &[(&str, &str)] = &[
    ("stroke-width", "strokeWidth"),
    ("stroke-opacity", "strokeOpacity"),
    ("stroke-linecap", "strokeLinecap"),
    ("stroke-linejoin", "strokeLinejoin"),
    ("stroke-dasharray", "strokeDasharray"),
    ("fill-opacity", "fillOpacity"),
    ("fill-rule", "fillRule"),
    ("font-size", "fontSize"),
    ("font-family", "fontFamily"),
    ("font-weight", "fontWeight"),
    ("text-anchor", "textAnchor"),
    ("dominant-baseline", "dominantBaseline"),
    ("alignment-baseline", "alignmentBaseline"),
];

/// Attributes the component-source serializer leaves out.
pub const DEFAULT_DROPPED: &[&str] = &["transform", "style"];

/// Maps a tag name to its component name. Total: unknown tags get their first character
/// upper-cased.
pub fn component_name(kind: &str) -> Cow<'_, str> {
    if let Some((_, name)) = COMPONENT_NAMES.iter().find(|(tag, _)| *tag == kind) {
        return Cow::Borrowed(*name);
    }
    let mut chars = kind.chars();
    match chars.next() {
        Some(first) => Cow::Owned(first.to_uppercase().chain(chars).collect()),
        None => Cow::Borrowed(kind),
    }
}

/// `-x` -> `X` for every dash followed by an ASCII lowercase letter; other dashes are kept.
pub fn kebab_to_camel(name: &str) -> Cow<'_, str> {
    if !name.contains('-') {
        return Cow::Borrowed(name);
    }
    let mut out = String::with_capacity(name.len());
    let mut chars = name.chars().peekable();
    while let Some(ch) = chars.next() {
        match (ch, chars.peek()) {
            ('-', Some(next)) if next.is_ascii_lowercase() => {
                out.push(next.to_ascii_uppercase());
                chars.next();
            }
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// Data-driven attribute name translation: explicit renames, an explicit drop set, and the
/// kebab-case fallback for everything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeTable {
    pub renames: IndexMap<String, String>,
    pub dropped: IndexSet<String>,
}

impl Default for AttributeTable {
    fn default() -> Self {
        Self {
            renames: DEFAULT_RENAMES
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
            dropped: DEFAULT_DROPPED.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl AttributeTable {
    /// A table that drops nothing.
    pub fn keep_all() -> Self {
        Self {
            dropped: IndexSet::new(),
            ..Self::default()
        }
    }

    pub fn without_drop(mut self, name: &str) -> Self {
        self.dropped.shift_remove(name);
        self
    }

    pub fn is_dropped(&self, name: &str) -> bool {
        self.dropped.contains(name)
    }

    /// The output prop name, or `None` when the attribute is dropped.
    pub fn translate<'a>(&'a self, name: &'a str) -> Option<Cow<'a, str>> {
        if self.is_dropped(name) {
            return None;
        }
        match self.renames.get(name) {
            Some(renamed) => Some(Cow::Borrowed(renamed.as_str())),
            None => Some(kebab_to_camel(name)),
        }
    }
}
