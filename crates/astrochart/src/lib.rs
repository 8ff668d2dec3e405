#![forbid(unsafe_code)]

//! `astrochart` is a headless astrological chart document model in Rust.
//!
//! Chart drawing code targets the DOM-shaped API in [`Document`] / [`Element`]; no browser or
//! rendering surface is involved. The resulting tree renders to component source for native
//! SVG toolkits, plain SVG markup, a native component tree, or raw JSON. See [`render`].

pub use astrochart_svg::*;

pub mod render {
    use astrochart_svg::{
        Document, Element, ElementRef, NativeTree, RenderConfig, extract_tree, from_json,
        render_native, to_component_source_with, to_json, to_svg_markup,
    };

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Tree(#[from] astrochart_svg::Error),
        #[error("document has no root element")]
        NoRoot,
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Converts an arbitrary string into a conservative SVG `id` token, e.g. for the chart's
    /// paper element when several charts share one UI tree.
    ///
    /// This helper:
    /// - trims whitespace
    /// - replaces unsupported characters with `-`
    /// - ensures the id starts with an ASCII letter by prefixing `c-` when needed
    pub fn sanitize_svg_id(raw: &str) -> String {
        let raw = raw.trim();
        if raw.is_empty() {
            return "c-untitled".to_string();
        }

        let mut out = String::with_capacity(raw.len() + 4);
        for ch in raw.chars() {
            let ok = ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || ch == ':' || ch == '.';
            out.push(if ok { ch } else { '-' });
        }

        let starts_ok = out.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
        if !starts_ok {
            out.insert_str(0, "c-");
        }

        while out.contains("--") {
            out = out.replace("--", "-");
        }
        let out = out.trim_matches('-');
        if out.is_empty() || out == "c" {
            return "c-untitled".to_string();
        }
        out.to_string()
    }

    pub fn render_component_source(root: &ElementRef, config: &RenderConfig) -> String {
        to_component_source_with(root, 0, &config.component)
    }

    pub fn render_svg(root: &ElementRef, config: &RenderConfig) -> String {
        to_svg_markup(root, &config.markup)
    }

    pub fn render_native_tree(root: &ElementRef, config: &RenderConfig) -> NativeTree {
        render_native(root, &config.native)
    }

    /// Bundles a [`Document`] with the options used to render it.
    ///
    /// Drawing code writes into [`HeadlessDocument::document`] and marks its paper element with
    /// [`Document::set_root`]; the `render_*` methods then serialize that root.
    #[derive(Debug, Default)]
    pub struct HeadlessDocument {
        pub document: Document,
        pub config: RenderConfig,
    }

    impl HeadlessDocument {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_config(mut self, config: RenderConfig) -> Self {
            self.config = config;
            self
        }

        /// Loads a raw JSON tree, registers its ids and makes it the root.
        pub fn from_json(text: &str) -> Result<Self> {
            let doc = Self::new();
            let root = doc.document.adopt(from_json(text)?);
            doc.document.set_root(&root);
            Ok(doc)
        }

        pub fn root(&self) -> Result<Element> {
            self.document.root().ok_or(HeadlessError::NoRoot)
        }

        fn root_tree(&self) -> Result<ElementRef> {
            Ok(extract_tree(&self.root()?))
        }

        pub fn render_component_source(&self) -> Result<String> {
            Ok(render_component_source(&self.root_tree()?, &self.config))
        }

        pub fn render_svg(&self) -> Result<String> {
            Ok(render_svg(&self.root_tree()?, &self.config))
        }

        pub fn render_native(&self) -> Result<NativeTree> {
            Ok(render_native_tree(&self.root_tree()?, &self.config))
        }

        pub fn render_json(&self, pretty: bool) -> Result<String> {
            Ok(to_json(&self.root_tree()?, pretty)?)
        }
    }
}
