use astrochart::render::{HeadlessDocument, HeadlessError, sanitize_svg_id};
use astrochart::{DocumentApi, ElementApi, RenderConfig};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn sanitize_svg_id_is_conservative() {
    assert_eq!(sanitize_svg_id("  paper  "), "paper");
    assert_eq!(sanitize_svg_id("radix chart #1"), "radix-chart-1");
    assert_eq!(sanitize_svg_id("1st"), "c-1st");
    assert_eq!(sanitize_svg_id(""), "c-untitled");
    assert_eq!(sanitize_svg_id("###"), "c-untitled");
}

#[test]
fn drawing_through_the_document_then_rendering_every_target() {
    let headless = HeadlessDocument::new();
    let doc = &headless.document;

    let paper = doc.create_element("svg");
    paper.set_attribute("id", &sanitize_svg_id("my chart"));
    paper.set_attribute("width", "400");
    let circle = doc.create_element("circle");
    circle.set_attribute("cx", "10");
    circle.set_attribute("cy", "10");
    circle.set_attribute("r", "5");
    paper.append_child(&circle);
    doc.body().append_child(&paper);
    doc.set_root(&paper);

    assert_eq!(
        headless.render_component_source().unwrap(),
        "<Svg id=\"my-chart\" width=\"400\">\n  <Circle cx=\"10\" cy=\"10\" r=\"5\" />\n</Svg>"
    );
    assert_eq!(
        headless.render_svg().unwrap(),
        "<svg xmlns=\"http://www.w3.org/2000/svg\" id=\"my-chart\" width=\"400\"><circle cx=\"10\" cy=\"10\" r=\"5\"/></svg>"
    );

    let native = headless.render_native().unwrap();
    assert_eq!(native.children.len(), 1);
    assert!(native.diagnostics.is_empty());

    let raw: serde_json::Value =
        serde_json::from_str(&headless.render_json(false).unwrap()).unwrap();
    assert_eq!(raw["id"], json!("my-chart"));
    assert_eq!(raw["children"][0]["type"], json!("circle"));
}

#[test]
fn loading_raw_json_registers_ids_and_sets_root() {
    let text = json!({
        "type": "svg",
        "children": [
            { "type": "g", "attributes": { "id": "astrology-radix", "transform": "rotate(30)" } }
        ]
    })
    .to_string();

    let config = RenderConfig::from_json_str(r#"{"component":{"indent_width":4}}"#).unwrap();
    let headless = HeadlessDocument::from_json(&text).unwrap().with_config(config);

    let radix = headless.document.get_element_by_id("astrology-radix").unwrap();
    assert_eq!(radix.get_attribute("transform").as_deref(), Some("rotate(30)"));
    assert_eq!(
        headless.render_component_source().unwrap(),
        "<Svg>\n    <G id=\"astrology-radix\" />\n</Svg>"
    );
}

#[test]
fn rendering_without_a_root_is_an_error() {
    let headless = HeadlessDocument::new();
    assert!(matches!(headless.render_svg(), Err(HeadlessError::NoRoot)));
    assert!(matches!(
        HeadlessDocument::from_json("[]"),
        Err(HeadlessError::Tree(_))
    ));
}
