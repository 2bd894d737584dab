use crate::values::{format_px, parse_px};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Display {
    None,
    Block,
    #[default]
    Inline,
    InlineBlock,
    Flex,
    InlineFlex,
    Grid,
    InlineGrid,
    ListItem,
    Table,
    Contents,
}

impl Display {
    pub fn parse(input: &str) -> Option<Self> {
        let display = match input.trim().to_ascii_lowercase().as_str() {
            "none" => Self::None,
            "block" => Self::Block,
            "inline" => Self::Inline,
            "inline-block" => Self::InlineBlock,
            "flex" => Self::Flex,
            "inline-flex" => Self::InlineFlex,
            "grid" => Self::Grid,
            "inline-grid" => Self::InlineGrid,
            "list-item" => Self::ListItem,
            "table" => Self::Table,
            "contents" => Self::Contents,
            _ => return None,
        };
        Some(display)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Block => "block",
            Self::Inline => "inline",
            Self::InlineBlock => "inline-block",
            Self::Flex => "flex",
            Self::InlineFlex => "inline-flex",
            Self::Grid => "grid",
            Self::InlineGrid => "inline-grid",
            Self::ListItem => "list-item",
            Self::Table => "table",
            Self::Contents => "contents",
        }
    }

    /// Block-level boxes fill their containing block when `width` is `auto`.
    pub const fn is_block_level(self) -> bool {
        matches!(
            self,
            Self::Block | Self::Flex | Self::Grid | Self::ListItem | Self::Table
        )
    }

    pub const fn is_flex(self) -> bool {
        matches!(self, Self::Flex | Self::InlineFlex)
    }

    pub const fn is_grid(self) -> bool {
        matches!(self, Self::Grid | Self::InlineGrid)
    }
}

/// Four-sided computed values, kept as CSS text so they can be copied verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sides {
    pub top: String,
    pub right: String,
    pub bottom: String,
    pub left: String,
}

impl Default for Sides {
    fn default() -> Self {
        Self::uniform("0px")
    }
}

impl Sides {
    pub fn uniform(value: &str) -> Self {
        Self {
            top: value.to_owned(),
            right: value.to_owned(),
            bottom: value.to_owned(),
            left: value.to_owned(),
        }
    }

    /// Expand a 1-4 value box shorthand (`margin: 4px auto`) into sides.
    pub fn from_shorthand(input: &str) -> Option<Self> {
        let parts: Vec<&str> = input.split_whitespace().collect();
        let (top, right, bottom, left) = match parts.as_slice() {
            [all] => (*all, *all, *all, *all),
            [vertical, horizontal] => (*vertical, *horizontal, *vertical, *horizontal),
            [top, horizontal, bottom] => (*top, *horizontal, *bottom, *horizontal),
            [top, right, bottom, left] => (*top, *right, *bottom, *left),
            _ => return None,
        };
        Some(Self {
            top: top.to_owned(),
            right: right.to_owned(),
            bottom: bottom.to_owned(),
            left: left.to_owned(),
        })
    }

    /// Four-value shorthand text, e.g. `"0px 8px 0px 8px"`.
    pub fn to_shorthand(&self) -> String {
        format!("{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }

    /// Sum of the left and right sides in px; non-px values count as zero.
    pub fn horizontal_px(&self) -> f32 {
        parse_px(&self.left).unwrap_or(0.0) + parse_px(&self.right).unwrap_or(0.0)
    }
}

/// Measured border-box size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoxSize {
    pub width: f32,
    pub height: f32,
}

/// The resolved style of one element, read once per node per transformation pass.
///
/// Text-valued fields mirror what `getComputedStyle` reports, so `width` of a rendered
/// element is a px string while a `display: none` element reports `"auto"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleSnapshot {
    pub display: Display,
    pub width: String,
    pub height: String,
    pub border_radius: String,
    pub padding: Sides,
    pub margin: Sides,
    pub flex_direction: String,
    pub gap: String,
    pub grid_template_columns: String,
    pub grid_template_rows: String,
    pub box_size: BoxSize,
}

impl Default for StyleSnapshot {
    fn default() -> Self {
        Self {
            display: Display::default(),
            width: String::from("auto"),
            height: String::from("auto"),
            border_radius: String::from("0px"),
            padding: Sides::default(),
            margin: Sides::default(),
            flex_direction: String::from("row"),
            gap: String::from("normal"),
            grid_template_columns: String::from("none"),
            grid_template_rows: String::from("none"),
            box_size: BoxSize::default(),
        }
    }
}

impl StyleSnapshot {
    /// A block box of the given size with every other property at its initial value.
    pub fn sized(width: f32, height: f32) -> Self {
        Self {
            display: Display::Block,
            width: format_px(width),
            height: format_px(height),
            box_size: BoxSize { width, height },
            ..Self::default()
        }
    }

    /// Snapshot for nodes that generate no box.
    pub fn not_rendered() -> Self {
        Self {
            display: Display::None,
            ..Self::default()
        }
    }

    pub fn is_displayed(&self) -> bool {
        self.display != Display::None
    }

    /// Width available to inline content: box width minus horizontal padding.
    pub fn content_width(&self) -> f32 {
        (self.box_size.width - self.padding.horizontal_px()).max(0.0)
    }

    pub fn width_px(&self) -> Option<f32> {
        parse_px(&self.width)
    }

    pub fn height_px(&self) -> Option<f32> {
        parse_px(&self.height)
    }
}
