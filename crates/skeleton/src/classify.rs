//! Node classification.

use skeleton_dom::{Document, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeCategory {
    Text,
    Image,
    Button,
    Icon,
    Container,
    Ignore,
}

const MEDIA_TAGS: &[&str] = &[
    "img", "picture", "video", "canvas", "iframe", "embed", "object",
];
const BUTTON_INPUT_TYPES: &[&str] = &["button", "submit", "reset", "image"];
const ICON_TAGS: &[&str] = &["svg", "i"];
const IGNORED_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "link", "meta", "head", "title", "base",
];

const ICON_CLASSES: &[&str] = &[
    "fa", "fas", "far", "fab", "fal", "fad", "bi", "icon", "glyphicon", "octicon",
];
const ICON_CLASS_PREFIXES: &[&str] = &[
    "fa-",
    "bi-",
    "icon-",
    "glyphicon-",
    "octicon-",
    "ion-",
    "lucide-",
    "ti-",
    "material-icons",
    "material-symbols",
];
const ICON_CLASS_SUFFIX: &str = "-icon";

/// Assign exactly one category to `node`. Rules are checked in order and the first
/// match wins, so a media element with `role="button"` is still an image.
pub fn classify(document: &Document, node: NodeId) -> NodeCategory {
    let Some(tag) = document.tag_name(node) else {
        return NodeCategory::Ignore;
    };
    let role = document
        .attribute(node, "role")
        .map(|role| role.trim().to_ascii_lowercase());
    let role = role.as_deref();

    if MEDIA_TAGS.contains(&tag) || role == Some("img") {
        return NodeCategory::Image;
    }
    if is_button(document, node, tag) || role == Some("button") {
        return NodeCategory::Button;
    }
    if ICON_TAGS.contains(&tag) || has_icon_class(document, node) {
        return NodeCategory::Icon;
    }
    if IGNORED_TAGS.contains(&tag) {
        return NodeCategory::Ignore;
    }

    if !document.element_children(node).is_empty() {
        return NodeCategory::Container;
    }
    if document.text_content(node).trim().is_empty() {
        NodeCategory::Ignore
    } else {
        NodeCategory::Text
    }
}

fn is_button(document: &Document, node: NodeId, tag: &str) -> bool {
    match tag {
        "button" => true,
        "input" => document
            .attribute(node, "type")
            .is_some_and(|kind| BUTTON_INPUT_TYPES.contains(&kind.trim().to_ascii_lowercase().as_str())),
        _ => false,
    }
}

/// Class names following common icon-library conventions.
pub fn is_icon_class(class: &str) -> bool {
    ICON_CLASSES.contains(&class)
        || ICON_CLASS_PREFIXES
            .iter()
            .any(|prefix| class.starts_with(prefix))
        || (class.len() > ICON_CLASS_SUFFIX.len() && class.ends_with(ICON_CLASS_SUFFIX))
}

fn has_icon_class(document: &Document, node: NodeId) -> bool {
    document
        .class_list(node)
        .iter()
        .any(|class| is_icon_class(class))
}
