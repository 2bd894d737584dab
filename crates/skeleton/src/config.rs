//! Process-level configuration for the skeleton engine.
//!
//! Configuration covers the inputs of the built-in style resolver and the batching of
//! sibling traversal. It can be loaded from environment variables or constructed
//! programmatically; per-call behavior lives in [`crate::SkeletonOptions`].

use skeleton_style::InlineStyleResolver;
use std::env;

/// Number of siblings processed per batch during container recursion.
pub const DEFAULT_CHILD_BATCH_SIZE: usize = 32;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkeletonConfig {
    /// Width of the initial containing block in pixels
    pub viewport_width: f32,
    /// Height of one line box in pixels, used for `auto` heights
    pub line_height: f32,
    /// Siblings visited per batch; never zero
    pub child_batch_size: usize,
}

impl Default for SkeletonConfig {
    fn default() -> Self {
        Self::new(1024.0, 20.0, DEFAULT_CHILD_BATCH_SIZE)
    }
}

impl SkeletonConfig {
    /// Construct a config, clamping every value into its usable range.
    ///
    /// Non-finite or non-positive lengths fall back to the defaults and a zero batch
    /// size becomes 1.
    #[must_use]
    pub fn new(viewport_width: f32, line_height: f32, child_batch_size: usize) -> Self {
        let positive_or = |value: f32, fallback: f32| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                fallback
            }
        };
        Self {
            viewport_width: positive_or(viewport_width, 1024.0),
            line_height: positive_or(line_height, 20.0),
            child_batch_size: child_batch_size.max(1),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Reads the following environment variables:
    /// - `SKELETON_VIEWPORT_WIDTH`: viewport width in pixels (default: 1024)
    /// - `SKELETON_LINE_HEIGHT`: line box height in pixels (default: 20)
    /// - `SKELETON_CHILD_BATCH`: siblings per traversal batch (default: 32)
    #[must_use]
    pub fn from_env() -> Self {
        let viewport_width = env::var("SKELETON_VIEWPORT_WIDTH")
            .ok()
            .and_then(|val| val.parse::<f32>().ok())
            .unwrap_or(1024.0);
        let line_height = env::var("SKELETON_LINE_HEIGHT")
            .ok()
            .and_then(|val| val.parse::<f32>().ok())
            .unwrap_or(20.0);
        let child_batch_size = env::var("SKELETON_CHILD_BATCH")
            .ok()
            .and_then(|val| val.parse::<usize>().ok())
            .unwrap_or(DEFAULT_CHILD_BATCH_SIZE);
        Self::new(viewport_width, line_height, child_batch_size)
    }

    /// The built-in resolver configured with this viewport and line height.
    #[must_use]
    pub const fn resolver(&self) -> InlineStyleResolver {
        InlineStyleResolver::new(self.viewport_width, self.line_height)
    }
}
