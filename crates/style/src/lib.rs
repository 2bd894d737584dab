//! Resolved style snapshots.
//!
//! A [`StyleSnapshot`] is the subset of computed style and layout metrics the skeleton
//! engine sizes placeholders from. Hosts with a layout engine feed snapshots through
//! [`LayoutSnapshots`]; everything else goes through [`InlineStyleResolver`], which
//! works from user-agent display defaults and `style="..."` attributes.

#![forbid(unsafe_code)]
#![allow(
    clippy::missing_inline_in_public_items,
    reason = "Inlining decisions left to compiler for this crate"
)]

mod declarations;
mod resolver;
mod snapshot;
mod values;

pub use declarations::{Declaration, parse_style_attribute, parse_style_attribute_into_map};
pub use resolver::{InlineStyleResolver, LayoutSnapshots, StyleResolver, default_display_for_tag};
pub use snapshot::{BoxSize, Display, Sides, StyleSnapshot};
pub use values::{SizeSpecified, format_px, parse_px, parse_size_spec};
