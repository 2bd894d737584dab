//! Placeholder geometry.
//!
//! Everything here is pure: the builder turns a category and a style snapshot into
//! inert [`PlaceholderBlock`] descriptors. Inserting them is the engine's job.

use crate::classify::NodeCategory;
use core::ops::RangeInclusive;
use rand::Rng;
use skeleton_style::{StyleSnapshot, format_px};

/// Assumed advance of one character when estimating how text wraps.
pub const ASSUMED_CHAR_WIDTH_PX: f32 = 8.0;

/// Upper bound on generated text lines.
pub const MAX_TEXT_LINES: usize = 5;

/// Height of one generated text line.
pub const TEXT_LINE_HEIGHT: &str = "0.8em";

const TEXT_LINE_RADIUS: &str = "4px";
const TEXT_LINE_SPACING: &str = "0 0 0.5em 0";
const NO_MARGIN: &str = "0px";

const LINE_WIDTH_RANGE: RangeInclusive<f32> = 0.6..=1.0;
const LAST_LINE_WIDTH_RANGE: RangeInclusive<f32> = 0.3..=0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Text,
    Image,
    Button,
    Icon,
}

impl Shape {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Button => "button",
            Self::Icon => "icon",
        }
    }

    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Text => "sk-text",
            Self::Image => "sk-image",
            Self::Button => "sk-button",
            Self::Icon => "sk-icon",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaceholderBlock {
    pub shape: Shape,
    pub width: String,
    pub height: String,
    pub border_radius: String,
    pub margin: String,
    /// `width / height` of the source box; only set for images with usable px sizes.
    pub aspect_ratio: Option<f32>,
}

impl PlaceholderBlock {
    /// Inline `style` text for the generated element.
    pub fn style_text(&self) -> String {
        let mut style = format!(
            "width: {}; height: {}; border-radius: {}; margin: {}",
            self.width, self.height, self.border_radius, self.margin
        );
        if let Some(ratio) = self.aspect_ratio {
            style.push_str(&format!("; aspect-ratio: {ratio}"));
        }
        style
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Placeholder {
    Block(PlaceholderBlock),
    Lines(Vec<PlaceholderBlock>),
}

impl Placeholder {
    pub fn blocks(&self) -> &[PlaceholderBlock] {
        match self {
            Self::Block(block) => core::slice::from_ref(block),
            Self::Lines(lines) => lines,
        }
    }
}

/// `width / height` from the px values of a snapshot, if both are usable.
pub fn aspect_ratio(snapshot: &StyleSnapshot) -> Option<f32> {
    let width = snapshot.width_px()?;
    let height = snapshot.height_px()?;
    if width <= 0.0 || height <= 0.0 {
        return None;
    }
    let ratio = width / height;
    ratio.is_finite().then_some(ratio)
}

/// Estimated wrapped line count for `text_len` characters, between 1 and [`MAX_TEXT_LINES`].
pub fn text_line_count(text_len: usize, content_width: f32) -> usize {
    let chars_per_line = if content_width.is_finite() && content_width > 0.0 {
        ((content_width / ASSUMED_CHAR_WIDTH_PX).floor() as usize).max(1)
    } else {
        1
    };
    text_len
        .div_ceil(chars_per_line)
        .clamp(1, MAX_TEXT_LINES)
}

/// Build the placeholder for a node of `category`.
///
/// Returns `None` for categories that are never replaced (`Container`, `Ignore`).
/// `text_len` is only read for `Text`; `rng` is only drawn from when `randomize` is set.
pub fn build_placeholder<R: Rng>(
    category: NodeCategory,
    snapshot: &StyleSnapshot,
    text_len: usize,
    randomize: bool,
    rng: &mut R,
) -> Option<Placeholder> {
    let shape = match category {
        NodeCategory::Text => {
            return Some(Placeholder::Lines(text_lines(
                snapshot, text_len, randomize, rng,
            )));
        }
        NodeCategory::Image => Shape::Image,
        NodeCategory::Button => Shape::Button,
        NodeCategory::Icon => Shape::Icon,
        NodeCategory::Container | NodeCategory::Ignore => return None,
    };
    Some(Placeholder::Block(PlaceholderBlock {
        shape,
        width: snapshot.width.clone(),
        height: snapshot.height.clone(),
        border_radius: snapshot.border_radius.clone(),
        margin: snapshot.margin.to_shorthand(),
        aspect_ratio: if shape == Shape::Image {
            aspect_ratio(snapshot)
        } else {
            None
        },
    }))
}

fn text_lines<R: Rng>(
    snapshot: &StyleSnapshot,
    text_len: usize,
    randomize: bool,
    rng: &mut R,
) -> Vec<PlaceholderBlock> {
    let content_width = snapshot.content_width();
    let count = text_line_count(text_len, content_width);
    (0..count)
        .map(|index| {
            let last = index + 1 == count;
            let fraction = if randomize {
                // A lone line is not a wrap-off, so it keeps the full-line range.
                let range = if last && count > 1 {
                    LAST_LINE_WIDTH_RANGE
                } else {
                    LINE_WIDTH_RANGE
                };
                rng.gen_range(range).clamp(0.0, 1.0)
            } else {
                1.0
            };
            PlaceholderBlock {
                shape: Shape::Text,
                width: format_px(content_width * fraction),
                height: TEXT_LINE_HEIGHT.to_owned(),
                border_radius: TEXT_LINE_RADIUS.to_owned(),
                margin: (if last { NO_MARGIN } else { TEXT_LINE_SPACING }).to_owned(),
                aspect_ratio: None,
            }
        })
        .collect()
}
