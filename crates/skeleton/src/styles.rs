//! Presentation stylesheet injection.
//!
//! The stylesheet is the class-name contract between the engine and the page: themes,
//! the shimmer sweep, speed presets and placeholder shapes. It is generated once per
//! process and inserted at most once per document.

use crate::builder::Shape;
use crate::markers::{
    BLOCK_CLASS, CONTAINER_CLASS, LAYOUT_ATTRIBUTE, NO_SHIMMER_CLASS, SHIMMER_CLASS,
    THEME_DARK_CLASS, THEME_LIGHT_CLASS,
};
use crate::options::Speed;
use log::{debug, warn};
use once_cell::sync::Lazy;
use skeleton_dom::Document;

/// `id` of the injected `<style>` element; its presence marks a document as styled.
pub const STYLE_ELEMENT_ID: &str = "sk-styles";

static STYLESHEET: Lazy<String> = Lazy::new(build_stylesheet);

/// The generated stylesheet text.
pub fn stylesheet() -> &'static str {
    STYLESHEET.as_str()
}

fn build_stylesheet() -> String {
    let block = BLOCK_CLASS;
    let mut rules = vec![
        format!(".{THEME_LIGHT_CLASS} {{ --sk-base: #e2e5e7; --sk-highlight: #f5f6f7; }}"),
        format!(".{THEME_DARK_CLASS} {{ --sk-base: #2b2f33; --sk-highlight: #3a3f44; }}"),
        format!(".{block} {{ display: block; background-color: var(--sk-base, #e2e5e7); }}"),
        format!(".{} {{ display: inline-block; }}", Shape::Icon.class_name()),
        format!(".{} {{ display: inline-block; }}", Shape::Button.class_name()),
        format!(".{} {{ max-width: 100%; }}", Shape::Image.class_name()),
        format!(".{} {{ max-width: 100%; }}", Shape::Text.class_name()),
        format!(
            ".{SHIMMER_CLASS} .{block} {{ background-image: linear-gradient(90deg, \
             var(--sk-base) 0%, var(--sk-highlight) 50%, var(--sk-base) 100%); \
             background-size: 200% 100%; animation: sk-shimmer var(--sk-duration, 1.5s) \
             ease-in-out infinite; }}"
        ),
        format!(".{NO_SHIMMER_CLASS} .{block} {{ background-image: none; animation: none; }}"),
    ];
    rules.extend(Speed::ALL.iter().map(|speed| {
        format!(
            ".{} {{ --sk-duration: {}s; }}",
            speed.class_name(),
            speed.duration_secs()
        )
    }));
    rules.push(format!(
        ".{CONTAINER_CLASS}[{LAYOUT_ATTRIBUTE}=\"flex-column\"] {{ flex-direction: column; }}"
    ));
    rules.push(String::from(
        "@keyframes sk-shimmer { from { background-position: 200% 0; } \
         to { background-position: -200% 0; } }",
    ));
    rules.join("\n")
}

/// Insert the stylesheet into `document` unless it is already there.
///
/// The `<style>` element goes into `<head>`, or under the document node when there is
/// no head. Returns whether an element was inserted.
pub fn ensure_styles(document: &mut Document) -> bool {
    if document.element_by_id(STYLE_ELEMENT_ID).is_some() {
        return false;
    }
    let parent = document
        .find_by_tag("head")
        .unwrap_or_else(|| document.root());
    let style = document.create_element("style");
    document.set_attribute(style, "id", STYLE_ELEMENT_ID);
    let text = document.create_text(stylesheet());
    let inserted = document
        .append_child(style, text)
        .and_then(|()| document.append_child(parent, style));
    match inserted {
        Ok(()) => {
            debug!("injected skeleton stylesheet");
            true
        }
        Err(err) => {
            warn!("could not inject skeleton stylesheet: {err}");
            document.remove_subtree(style);
            false
        }
    }
}
