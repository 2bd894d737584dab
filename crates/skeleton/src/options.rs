//! Per-call transformation options.

use crate::markers::{
    NO_SHIMMER_CLASS, SHIMMER_CLASS, SPEED_FAST_CLASS, SPEED_NORMAL_CLASS, SPEED_SLOW_CLASS,
    THEME_DARK_CLASS, THEME_LIGHT_CLASS,
};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Light => THEME_LIGHT_CLASS,
            Self::Dark => THEME_DARK_CLASS,
        }
    }
}

/// Animation timing preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl Speed {
    pub const ALL: [Self; 3] = [Self::Slow, Self::Normal, Self::Fast];

    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "slow" => Some(Self::Slow),
            "normal" => Some(Self::Normal),
            "fast" => Some(Self::Fast),
            _ => None,
        }
    }

    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Slow => SPEED_SLOW_CLASS,
            Self::Normal => SPEED_NORMAL_CLASS,
            Self::Fast => SPEED_FAST_CLASS,
        }
    }

    /// Length of one shimmer sweep.
    pub const fn duration_secs(self) -> f32 {
        match self {
            Self::Slow => 2.0,
            Self::Normal => 1.5,
            Self::Fast => 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SkeletonOptions {
    pub theme: Theme,
    /// Vary text line widths instead of drawing every line at full width.
    pub randomize: bool,
    pub speed: Speed,
    pub shimmer: bool,
    /// Recurse into containers; when false only the root is classified.
    pub deep: bool,
    /// Deepest level that still gets placeholders; the root is depth 0.
    pub max_depth: usize,
    /// Seed for line width draws, for reproducible output.
    pub seed: Option<u64>,
}

impl Default for SkeletonOptions {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            randomize: true,
            speed: Speed::Normal,
            shimmer: true,
            deep: true,
            max_depth: 10,
            seed: None,
        }
    }
}

impl SkeletonOptions {
    /// Build options from loosely typed JSON.
    ///
    /// Missing fields, unknown fields and values of the wrong type or outside the known
    /// set all fall back to the defaults. A negative `maxDepth` is clamped to 0.
    pub fn from_json(input: &str) -> Self {
        match serde_json::from_str::<Value>(input) {
            Ok(Value::Object(map)) => Self::from_map(&map),
            Ok(other) => {
                debug!("ignoring non-object skeleton options: {other}");
                Self::default()
            }
            Err(err) => {
                debug!("ignoring unparsable skeleton options: {err}");
                Self::default()
            }
        }
    }

    fn from_map(map: &Map<String, Value>) -> Self {
        let defaults = Self::default();
        let field = |name: &str| map.get(name);
        Self {
            theme: field("theme")
                .and_then(Value::as_str)
                .and_then(Theme::parse)
                .unwrap_or(defaults.theme),
            randomize: field("randomize")
                .and_then(Value::as_bool)
                .unwrap_or(defaults.randomize),
            speed: field("speed")
                .and_then(Value::as_str)
                .and_then(Speed::parse)
                .unwrap_or(defaults.speed),
            shimmer: field("shimmer")
                .and_then(Value::as_bool)
                .unwrap_or(defaults.shimmer),
            deep: field("deep")
                .and_then(Value::as_bool)
                .unwrap_or(defaults.deep),
            max_depth: field("maxDepth")
                .and_then(parse_depth)
                .unwrap_or(defaults.max_depth),
            seed: field("seed").and_then(Value::as_u64).or(defaults.seed),
        }
    }

    pub const fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub const fn with_speed(mut self, speed: Speed) -> Self {
        self.speed = speed;
        self
    }

    pub const fn with_randomize(mut self, randomize: bool) -> Self {
        self.randomize = randomize;
        self
    }

    pub const fn with_shimmer(mut self, shimmer: bool) -> Self {
        self.shimmer = shimmer;
        self
    }

    pub const fn with_deep(mut self, deep: bool) -> Self {
        self.deep = deep;
        self
    }

    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Marker classes attached to the root for these options.
    pub const fn presentation_classes(&self) -> [&'static str; 3] {
        [
            self.theme.class_name(),
            if self.shimmer {
                SHIMMER_CLASS
            } else {
                NO_SHIMMER_CLASS
            },
            self.speed.class_name(),
        ]
    }
}

fn parse_depth(value: &Value) -> Option<usize> {
    if let Some(depth) = value.as_u64() {
        return Some(usize::try_from(depth).unwrap_or(usize::MAX));
    }
    if value.as_i64().is_some() {
        return Some(0);
    }
    value
        .as_f64()
        .filter(|depth| depth.is_finite())
        .map(|depth| if depth <= 0.0 { 0 } else { depth.floor() as usize })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let options = SkeletonOptions::default();
        assert_eq!(options.theme, Theme::Light);
        assert!(options.randomize);
        assert_eq!(options.speed, Speed::Normal);
        assert!(options.shimmer);
        assert!(options.deep);
        assert_eq!(options.max_depth, 10);
        assert_eq!(options.seed, None);
    }

    #[test]
    fn lenient_json_falls_back_per_field() {
        let options = SkeletonOptions::from_json(
            r#"{"theme":"neon","speed":"fast","shimmer":"yes","deep":false,"maxDepth":-3,"extra":1}"#,
        );
        assert_eq!(options.theme, Theme::Light);
        assert_eq!(options.speed, Speed::Fast);
        assert!(options.shimmer);
        assert!(!options.deep);
        assert_eq!(options.max_depth, 0);
    }

    #[test]
    fn non_object_json_is_default() {
        assert_eq!(SkeletonOptions::from_json("[1,2]"), SkeletonOptions::default());
        assert_eq!(SkeletonOptions::from_json("{"), SkeletonOptions::default());
    }

    #[test]
    fn fractional_depth_is_floored() {
        let options = SkeletonOptions::from_json(r#"{"maxDepth": 2.7, "seed": 9}"#);
        assert_eq!(options.max_depth, 2);
        assert_eq!(options.seed, Some(9));
    }

    #[test]
    fn presentation_classes_follow_options() {
        let options = SkeletonOptions::default()
            .with_theme(Theme::Dark)
            .with_shimmer(false)
            .with_speed(Speed::Slow);
        assert_eq!(
            options.presentation_classes(),
            ["sk-theme-dark", "sk-no-shimmer", "sk-speed-slow"]
        );
    }
}
