use super::*;
use crate::document::{Document, DocumentApi};
use crate::element::{Element, ElementApi};
use crate::extract::extract_tree;

fn chart(doc: &Document) -> Element {
    let svg = doc.create_element("svg");
    svg.set_attribute("width", "600");
    svg.set_attribute("viewBox", "0 0 600 600");

    let g = doc.create_element("g");
    g.set_attribute("id", "astrology-radix");
    g.set_attribute("transform", "rotate(-90 300 300)");

    let line = doc.create_element("line");
    line.set_attribute("stroke-width", "2");
    line.set_attribute("stroke", "#333");
    g.append_child(&line);

    let label = doc.create_element("text");
    label.set_attribute("font-size", "14");
    label.append_child(&doc.create_text_node("Sun"));
    label.append_child(&doc.create_text_node("ignored"));
    g.append_child(&label);

    svg.append_child(&g);
    svg
}

#[test]
fn svg_root_becomes_host_props() {
    let doc = Document::new();
    let tree = render_native(&extract_tree(&chart(&doc)), &NativeRenderOptions::default());

    assert_eq!(tree.root_props.get("width"), Some(&PropValue::Number(600.0)));
    assert_eq!(tree.root_props.get("height"), Some(&PropValue::Number(800.0)));
    assert_eq!(
        tree.root_props.get("viewBox").and_then(PropValue::as_str),
        Some("0 0 600 600")
    );
    assert_eq!(tree.children.len(), 1);
    assert!(tree.diagnostics.is_empty());
}

#[test]
fn props_are_camel_cased_and_stroke_width_is_numeric() {
    let doc = Document::new();
    let tree = render_native(&extract_tree(&chart(&doc)), &NativeRenderOptions::default());

    let g = &tree.children[0];
    assert_eq!(g.component, NativeComponent::G);
    assert_eq!(
        g.props.get("transform").and_then(PropValue::as_str),
        Some("rotate(-90 300 300)")
    );
    assert_eq!(g.props.get("id").and_then(PropValue::as_str), Some("astrology-radix"));

    let NativeChild::Element(line) = &g.children[0] else {
        panic!("expected line element");
    };
    assert_eq!(line.component, NativeComponent::Line);
    assert_eq!(line.props.get("strokeWidth"), Some(&PropValue::Number(2.0)));
    assert_eq!(line.props.get("stroke").and_then(PropValue::as_str), Some("#333"));
}

#[test]
fn text_elements_take_their_first_text_child() {
    let doc = Document::new();
    let tree = render_native(&extract_tree(&chart(&doc)), &NativeRenderOptions::default());

    let NativeChild::Element(label) = &tree.children[0].children[1] else {
        panic!("expected text element");
    };
    assert_eq!(label.component, NativeComponent::Text);
    assert_eq!(label.props.get("fontSize").and_then(PropValue::as_str), Some("14"));
    assert_eq!(label.children, vec![NativeChild::Text("Sun".to_string())]);
}

#[test]
fn unknown_kinds_are_reported_once_and_skipped_with_subtree() {
    let doc = Document::new();
    let svg = doc.create_element("svg");
    let defs = doc.create_element("defs");
    defs.append_child(&doc.create_element("clipPath"));
    svg.append_child(&defs);
    svg.append_child(&doc.create_element("circle"));

    let tree = render_native(&extract_tree(&svg), &NativeRenderOptions::default());

    assert_eq!(
        tree.diagnostics,
        vec![Diagnostic::UnknownKind {
            kind: "defs".to_string()
        }]
    );
    assert_eq!(tree.children.len(), 1);
    assert_eq!(tree.children[0].component, NativeComponent::Circle);
    assert_eq!(
        tree.diagnostics[0].to_string(),
        "Unknown SVG element type: defs"
    );
}

#[test]
fn non_svg_root_is_rendered_as_single_child_with_default_host_props() {
    let doc = Document::new();
    let g = doc.create_element("g");
    g.append_child(&doc.create_text_node("stray"));
    g.append_child(&doc.create_element("rect"));

    let options = NativeRenderOptions {
        default_width: 300.0,
        default_height: 200.0,
        keep_transform: false,
    };
    let tree = render_native(&extract_tree(&g), &options);

    assert_eq!(tree.root_props.get("width"), Some(&PropValue::Number(300.0)));
    assert_eq!(
        tree.root_props.get("viewBox").and_then(PropValue::as_str),
        Some("0 0 300 200")
    );
    assert_eq!(tree.children.len(), 1);
    assert_eq!(tree.children[0].children.len(), 1);
}

#[test]
fn transform_can_be_stripped_and_nested_svg_is_flattened() {
    let doc = Document::new();
    let outer = doc.create_element("svg");
    let inner = doc.create_element("svg");
    let path = doc.create_element("path");
    path.set_attribute("transform", "translate(1 1)");
    path.set_attribute("stroke-width", "thin");
    inner.append_child(&path);
    outer.append_child(&inner);

    let options = NativeRenderOptions {
        keep_transform: false,
        ..NativeRenderOptions::default()
    };
    let tree = render_native(&extract_tree(&outer), &options);

    assert_eq!(tree.children.len(), 1);
    let path = &tree.children[0];
    assert_eq!(path.component, NativeComponent::Path);
    assert!(path.props.get("transform").is_none());
    assert_eq!(path.props.get("strokeWidth"), Some(&PropValue::Number(1.0)));
}

#[test]
fn parse_number_reads_leading_numbers() {
    assert_eq!(parse_number("12"), Some(12.0));
    assert_eq!(parse_number(" 1.5px "), Some(1.5));
    assert_eq!(parse_number("-3"), Some(-3.0));
    assert_eq!(parse_number("auto"), None);
    assert_eq!(parse_number(""), None);
    assert_eq!(parse_number("1e1"), Some(10.0));
    assert_eq!(parse_number("2.5E-1px"), Some(0.25));
    assert_eq!(parse_number("3e"), Some(3.0));
    assert_eq!(parse_number("4e+"), Some(4.0));
    assert_eq!(parse_number("1.2.3"), Some(1.2));
    assert_eq!(parse_number(".5"), Some(0.5));
    assert_eq!(parse_number("5."), Some(5.0));
    assert_eq!(parse_number("-.5"), Some(-0.5));
    assert_eq!(parse_number("0"), Some(0.0));
    assert_eq!(parse_number("."), None);
    assert_eq!(parse_number("-"), None);
    assert_eq!(parse_number("+e1"), None);
    assert_eq!(parse_number("1e999"), None);
}

#[test]
fn stroke_width_follows_leading_number_rules() {
    let doc = Document::new();
    let g = doc.create_element("g");
    for width in ["1e1", "1.2.3", ".5", "0"] {
        let line = doc.create_element("line");
        line.set_attribute("stroke-width", width);
        g.append_child(&line);
    }

    let tree = render_native(&extract_tree(&g), &NativeRenderOptions::default());
    let widths: Vec<Option<f64>> = tree.children[0]
        .children
        .iter()
        .map(|child| match child {
            NativeChild::Element(el) => el.props.get("strokeWidth").and_then(PropValue::as_f64),
            NativeChild::Text(_) => None,
        })
        .collect();
    assert_eq!(widths, vec![Some(10.0), Some(1.2), Some(0.5), Some(0.0)]);
}
