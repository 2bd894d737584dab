//! Style resolution: turning a live element into a [`StyleSnapshot`].

use crate::declarations::parse_style_attribute_into_map;
use crate::snapshot::{BoxSize, Display, Sides, StyleSnapshot};
use crate::values::{SizeSpecified, format_px, parse_px, parse_size_spec};
use log::trace;
use skeleton_dom::{Document, NodeId};
use std::collections::HashMap;

/// Source of resolved style snapshots.
///
/// Implementations must be pure reads of the document: the engine calls `resolve`
/// once per node per pass and relies on nothing changing underneath it.
pub trait StyleResolver {
    fn resolve(&self, document: &Document, node: NodeId) -> StyleSnapshot;
}

impl<R: StyleResolver + ?Sized> StyleResolver for &R {
    fn resolve(&self, document: &Document, node: NodeId) -> StyleSnapshot {
        (**self).resolve(document, node)
    }
}

/// User-agent display defaults. Anything not listed is inline.
pub fn default_display_for_tag(tag: &str) -> Display {
    match tag.to_ascii_lowercase().as_str() {
        "style" | "script" | "head" | "title" | "meta" | "link" | "base" | "template"
        | "noscript" => Display::None,
        "div" | "p" | "header" | "main" | "footer" | "section" | "article" | "nav" | "aside"
        | "ul" | "ol" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "html" | "body" | "form"
        | "figure" | "figcaption" | "blockquote" | "pre" | "hr" | "dl" | "dt" | "dd"
        | "fieldset" | "address" | "details" | "summary" => Display::Block,
        "li" => Display::ListItem,
        "table" => Display::Table,
        "button" | "input" | "select" | "textarea" => Display::InlineBlock,
        _ => Display::Inline,
    }
}

/// Elements whose presentational `width`/`height` attributes map to dimensions.
const SIZED_BY_ATTRIBUTES: &[&str] = &[
    "img", "video", "canvas", "iframe", "embed", "object", "svg", "input",
];

/// Replaced elements that fall back to the HTML default object size.
const REPLACED_TAGS: &[&str] = &["img", "video", "canvas", "iframe", "embed", "object"];

/// Default object size of replaced elements without their own dimensions.
const DEFAULT_OBJECT_SIZE: BoxSize = BoxSize {
    width: 300.0,
    height: 150.0,
};

/// Glyph-style elements that take one line box square when empty.
const GLYPH_TAGS: &[&str] = &["i", "svg"];

/// Rough advance of one character, used to estimate shrink-to-fit widths.
const ESTIMATED_CHAR_WIDTH_PX: f32 = 8.0;

/// Resolves styles from user-agent defaults and inline `style` attributes.
///
/// Layout is approximated: `auto` widths of block-level boxes fill the containing
/// block, inline boxes shrink to an estimate of their text, and `auto` heights resolve
/// to a single line box when the element has content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InlineStyleResolver {
    viewport_width: f32,
    line_height: f32,
}

impl Default for InlineStyleResolver {
    fn default() -> Self {
        Self::new(1024.0, 20.0)
    }
}

impl InlineStyleResolver {
    pub const fn new(viewport_width: f32, line_height: f32) -> Self {
        Self {
            viewport_width,
            line_height,
        }
    }

    pub const fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    pub const fn line_height(&self) -> f32 {
        self.line_height
    }

    fn declarations(document: &Document, node: NodeId) -> HashMap<String, String> {
        document
            .attribute(node, "style")
            .map(parse_style_attribute_into_map)
            .unwrap_or_default()
    }

    fn display_of(document: &Document, node: NodeId, decls: &HashMap<String, String>) -> Display {
        if let Some(display) = decls.get("display").and_then(|value| Display::parse(value)) {
            return display;
        }
        if document.has_attribute(node, "hidden") {
            return Display::None;
        }
        document
            .tag_name(node)
            .map_or(Display::Inline, default_display_for_tag)
    }

    fn sides(decls: &HashMap<String, String>, property: &str, initial: &str) -> Sides {
        let mut sides = decls
            .get(property)
            .and_then(|value| Sides::from_shorthand(value))
            .unwrap_or_else(|| Sides::uniform(initial));
        let longhands = [
            ("top", &mut sides.top),
            ("right", &mut sides.right),
            ("bottom", &mut sides.bottom),
            ("left", &mut sides.left),
        ];
        for (side, slot) in longhands {
            if let Some(value) = decls.get(&format!("{property}-{side}")) {
                value.clone_into(slot);
            }
        }
        sides
    }

    fn size_spec(
        document: &Document,
        node: NodeId,
        decls: &HashMap<String, String>,
        property: &str,
    ) -> SizeSpecified {
        if let Some(size) = decls.get(property).and_then(|value| parse_size_spec(value)) {
            return size;
        }
        let sized_by_attrs = document
            .tag_name(node)
            .is_some_and(|tag| SIZED_BY_ATTRIBUTES.contains(&tag));
        if !sized_by_attrs {
            return SizeSpecified::Auto;
        }
        document
            .attribute(node, property)
            .and_then(parse_px)
            .map_or(SizeSpecified::Auto, SizeSpecified::Px)
    }

    /// Size used for `auto` dimensions of replaced and empty glyph elements.
    fn intrinsic_size(&self, document: &Document, node: NodeId) -> Option<BoxSize> {
        let tag = document.tag_name(node)?;
        if REPLACED_TAGS.contains(&tag) {
            return Some(DEFAULT_OBJECT_SIZE);
        }
        let empty = document.element_children(node).is_empty()
            && document.text_content(node).trim().is_empty();
        (GLYPH_TAGS.contains(&tag) && empty).then_some(BoxSize {
            width: self.line_height,
            height: self.line_height,
        })
    }

    /// Width of the content box of the nearest element ancestor, or the viewport.
    fn containing_width(&self, document: &Document, node: NodeId) -> f32 {
        let Some(parent) = document.parent(node) else {
            return self.viewport_width;
        };
        if !document.is_element(parent) {
            return self.viewport_width;
        }
        let decls = Self::declarations(document, parent);
        let padding = Self::sides(&decls, "padding", "0px");
        (self.border_box_width(document, parent, &decls) - padding.horizontal_px()).max(0.0)
    }

    fn border_box_width(
        &self,
        document: &Document,
        node: NodeId,
        decls: &HashMap<String, String>,
    ) -> f32 {
        let display = Self::display_of(document, node, decls);
        if display == Display::None {
            return 0.0;
        }
        let containing = self.containing_width(document, node);
        match Self::size_spec(document, node, decls, "width") {
            SizeSpecified::Px(px) => px,
            SizeSpecified::Percent(fraction) => containing * fraction,
            SizeSpecified::Auto => {
                if let Some(intrinsic) = self.intrinsic_size(document, node) {
                    return intrinsic.width;
                }
                if display.is_block_level() {
                    let margin = Self::sides(decls, "margin", default_margin(document, node));
                    return (containing - margin.horizontal_px()).max(0.0);
                }
                if !document.element_children(node).is_empty() {
                    return containing;
                }
                let chars = document.text_content(node).trim().chars().count();
                (chars as f32 * ESTIMATED_CHAR_WIDTH_PX).min(containing)
            }
        }
    }

    fn border_box_height(
        &self,
        document: &Document,
        node: NodeId,
        decls: &HashMap<String, String>,
    ) -> f32 {
        match Self::size_spec(document, node, decls, "height") {
            SizeSpecified::Px(px) => px,
            // Percent heights need a definite parent height, which this resolver never has.
            SizeSpecified::Percent(_) | SizeSpecified::Auto => {
                if let Some(intrinsic) = self.intrinsic_size(document, node) {
                    return intrinsic.height;
                }
                let has_content = !document.element_children(node).is_empty()
                    || !document.text_content(node).trim().is_empty();
                if has_content { self.line_height } else { 0.0 }
            }
        }
    }
}

fn default_margin(document: &Document, node: NodeId) -> &'static str {
    if document.tag_name(node) == Some("body") {
        "8px"
    } else {
        "0px"
    }
}

impl StyleResolver for InlineStyleResolver {
    fn resolve(&self, document: &Document, node: NodeId) -> StyleSnapshot {
        if !document.is_element(node) {
            return StyleSnapshot::not_rendered();
        }
        let decls = Self::declarations(document, node);
        let display = Self::display_of(document, node, &decls);
        let text = |property: &str, initial: &str| {
            decls
                .get(property)
                .cloned()
                .unwrap_or_else(|| initial.to_owned())
        };

        let mut snapshot = StyleSnapshot {
            display,
            border_radius: text("border-radius", "0px"),
            padding: Self::sides(&decls, "padding", "0px"),
            margin: Self::sides(&decls, "margin", default_margin(document, node)),
            flex_direction: text("flex-direction", "row"),
            gap: text("gap", "normal"),
            grid_template_columns: text("grid-template-columns", "none"),
            grid_template_rows: text("grid-template-rows", "none"),
            ..StyleSnapshot::default()
        };
        if display != Display::None {
            let width = self.border_box_width(document, node, &decls);
            let height = self.border_box_height(document, node, &decls);
            snapshot.width = format_px(width);
            snapshot.height = format_px(height);
            snapshot.box_size = BoxSize { width, height };
        }
        trace!(
            "resolved {:?} display={} size={}x{}",
            document.tag_name(node),
            snapshot.display.as_str(),
            snapshot.width,
            snapshot.height
        );
        snapshot
    }
}

/// Snapshots supplied by a host layout engine, falling back to another resolver.
#[derive(Debug, Clone, Default)]
pub struct LayoutSnapshots<F = InlineStyleResolver> {
    snapshots: HashMap<NodeId, StyleSnapshot>,
    fallback: F,
}

impl<F: StyleResolver> LayoutSnapshots<F> {
    pub fn new(fallback: F) -> Self {
        Self {
            snapshots: HashMap::new(),
            fallback,
        }
    }

    /// Record the snapshot for `node`, returning the one it replaces.
    pub fn insert(&mut self, node: NodeId, snapshot: StyleSnapshot) -> Option<StyleSnapshot> {
        self.snapshots.insert(node, snapshot)
    }

    pub fn get(&self, node: NodeId) -> Option<&StyleSnapshot> {
        self.snapshots.get(&node)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl<F: StyleResolver> StyleResolver for LayoutSnapshots<F> {
    fn resolve(&self, document: &Document, node: NodeId) -> StyleSnapshot {
        self.snapshots
            .get(&node)
            .cloned()
            .unwrap_or_else(|| self.fallback.resolve(document, node))
    }
}
