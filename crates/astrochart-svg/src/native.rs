//! Native component tree renderer.
//!
//! Walks a raw tree and builds the element tree a native SVG toolkit consumes: a fixed set of
//! components, camelCase props, numeric `strokeWidth`. Unknown kinds are reported once and
//! skipped together with their subtree, so a chart always renders.

use crate::attr::kebab_to_camel;
use crate::node::{ElementNode, ElementRef};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NativeComponent {
    Svg,
    G,
    Path,
    Circle,
    Line,
    Rect,
    Text,
}

impl NativeComponent {
    pub fn from_kind(kind: &str) -> Option<Self> {
        Some(match kind {
            "svg" => Self::Svg,
            "g" => Self::G,
            "path" => Self::Path,
            "circle" => Self::Circle,
            "line" => Self::Line,
            "rect" => Self::Rect,
            "text" => Self::Text,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    Number(f64),
    Text(String),
}

impl PropValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropValue::Number(n) => Some(*n),
            PropValue::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::Text(s) => Some(s),
            PropValue::Number(_) => None,
        }
    }
}

pub type Props = IndexMap<String, PropValue>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeElement {
    pub component: NativeComponent,
    pub props: Props,
    pub children: Vec<NativeChild>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NativeChild {
    Element(NativeElement),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Diagnostic {
    UnknownKind {
        #[serde(rename = "type")]
        kind: String,
    },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::UnknownKind { kind } => write!(f, "Unknown SVG element type: {kind}"),
        }
    }
}

/// Output of [`render_native`]: props for the outer `Svg` host plus its rendered children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeTree {
    pub root_props: Props,
    pub children: Vec<NativeElement>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NativeRenderOptions {
    /// Used when the root lacks a numeric `width`.
    pub default_width: f64,
    pub default_height: f64,
    /// Pass `transform` through; native adapters apply it themselves.
    pub keep_transform: bool,
}

impl Default for NativeRenderOptions {
    fn default() -> Self {
        Self {
            default_width: 800.0,
            default_height: 800.0,
            keep_transform: true,
        }
    }
}

pub fn render_native(root: &ElementRef, options: &NativeRenderOptions) -> NativeTree {
    tracing::trace!(kind = %root.kind(), "rendering native tree");
    let mut renderer = Renderer {
        options,
        diagnostics: Vec::new(),
    };

    let node = root.borrow();
    let (root_props, children) = if node.kind == "svg" {
        (renderer.root_props(&node), renderer.render_children(&node))
    } else {
        let props = renderer.root_props(&ElementNode::default());
        let children = renderer.render_element(root).into_iter().collect();
        (props, children)
    };

    NativeTree {
        root_props,
        children,
        diagnostics: renderer.diagnostics,
    }
}

struct Renderer<'a> {
    options: &'a NativeRenderOptions,
    diagnostics: Vec<Diagnostic>,
}

impl Renderer<'_> {
    fn root_props(&self, node: &ElementNode) -> Props {
        let width = number_attr(node, "width").unwrap_or(self.options.default_width);
        let height = number_attr(node, "height").unwrap_or(self.options.default_height);
        let view_box = node
            .attributes
            .get("viewBox")
            .cloned()
            .unwrap_or_else(|| format!("0 0 {width} {height}"));

        let mut props = Props::new();
        props.insert("width".to_string(), PropValue::Number(width));
        props.insert("height".to_string(), PropValue::Number(height));
        props.insert("viewBox".to_string(), PropValue::Text(view_box));
        props
    }

    /// Element children rendered in order; nested `svg` elements are flattened into the parent.
    /// Bare text nodes under containers have no native counterpart and are dropped.
    fn render_children(&mut self, node: &ElementNode) -> Vec<NativeElement> {
        let mut out = Vec::new();
        for child in node.element_children() {
            if child.borrow().kind == "svg" {
                let nested = child.borrow();
                out.extend(self.render_children(&nested));
                continue;
            }
            out.extend(self.render_element(child));
        }
        out
    }

    fn render_element(&mut self, el: &ElementRef) -> Option<NativeElement> {
        let node = el.borrow();
        let Some(component) = NativeComponent::from_kind(&node.kind) else {
            tracing::warn!(kind = %node.kind, "Unknown SVG element type");
            self.diagnostics.push(Diagnostic::UnknownKind {
                kind: node.kind.clone(),
            });
            return None;
        };

        let props = self.props(&node);
        let children = match component {
            NativeComponent::Text => node
                .first_text()
                .map(|text| vec![NativeChild::Text(text.content.clone())])
                .unwrap_or_default(),
            NativeComponent::G | NativeComponent::Svg => self
                .render_children(&node)
                .into_iter()
                .map(NativeChild::Element)
                .collect(),
            // Shapes are leaves.
            _ => Vec::new(),
        };

        Some(NativeElement {
            component,
            props,
            children,
        })
    }

    fn props(&self, node: &ElementNode) -> Props {
        let mut props = Props::new();
        for (key, value) in &node.attributes {
            if key == "transform" && !self.options.keep_transform {
                continue;
            }
            let name = kebab_to_camel(key).into_owned();
            let value = match name.as_str() {
                "strokeWidth" => PropValue::Number(parse_number(value).unwrap_or(1.0)),
                "width" | "height" => match parse_number(value) {
                    Some(n) => PropValue::Number(n),
                    None => PropValue::Text(value.clone()),
                },
                _ => PropValue::Text(value.clone()),
            };
            props.insert(name, value);
        }
        props
    }
}

fn number_attr(node: &ElementNode, name: &str) -> Option<f64> {
    node.attributes.get(name).and_then(|v| parse_number(v))
}

/// Leading-number parse in the manner of `parseFloat` (`"12px"` -> 12.0, `"1e1"` -> 10.0,
/// `"1.2.3"` -> 1.2); `None` when no number leads the string.
fn parse_number(value: &str) -> Option<f64> {
    let s = value.trim();
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end > end;
    end = int_end;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        if frac_end > end + 1 || mantissa_digits {
            mantissa_digits |= frac_end > end + 1;
            end = frac_end;
        }
    }
    if !mantissa_digits {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }
    s[..end].parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests;
