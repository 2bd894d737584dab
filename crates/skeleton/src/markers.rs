//! Class names and attributes this crate writes into the tree.
//!
//! Everything listed here is removed again when a root is restored. Attributes are
//! identified by [`ATTRIBUTE_PREFIX`]; classes are the fixed [`MARKER_CLASSES`] set.

/// Prefix reserved for attributes owned by the transformation.
pub const ATTRIBUTE_PREFIX: &str = "data-sk-";

/// Transform state flag recorded on the root itself.
pub const ACTIVE_ATTRIBUTE: &str = "data-sk-active";

/// Layout mode of a marked container (`block`, `flex-row`, `flex-column`, `grid`, `inline`).
pub const LAYOUT_ATTRIBUTE: &str = "data-sk-layout";

/// Shape name carried by every generated placeholder element.
pub const PLACEHOLDER_ATTRIBUTE: &str = "data-sk-placeholder";

pub const THEME_LIGHT_CLASS: &str = "sk-theme-light";
pub const THEME_DARK_CLASS: &str = "sk-theme-dark";
pub const SHIMMER_CLASS: &str = "sk-shimmer";
pub const NO_SHIMMER_CLASS: &str = "sk-no-shimmer";
pub const SPEED_SLOW_CLASS: &str = "sk-speed-slow";
pub const SPEED_NORMAL_CLASS: &str = "sk-speed-normal";
pub const SPEED_FAST_CLASS: &str = "sk-speed-fast";
pub const CONTAINER_CLASS: &str = "sk-container";

/// Base class of generated placeholder elements.
pub const BLOCK_CLASS: &str = "sk-block";

/// Presentation and structural markers that may be attached to a root.
pub const MARKER_CLASSES: &[&str] = &[
    THEME_LIGHT_CLASS,
    THEME_DARK_CLASS,
    SHIMMER_CLASS,
    NO_SHIMMER_CLASS,
    SPEED_SLOW_CLASS,
    SPEED_NORMAL_CLASS,
    SPEED_FAST_CLASS,
    CONTAINER_CLASS,
];

pub fn is_reserved_attribute(name: &str) -> bool {
    name.len() >= ATTRIBUTE_PREFIX.len()
        && name
            .get(..ATTRIBUTE_PREFIX.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(ATTRIBUTE_PREFIX))
}
