use crate::error::DocResult;
use serde::{Deserialize, Serialize};

/// Knobs for building a document model. Every field has a default, so a partial YAML
/// file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParseOptions {
    /// Ceiling for the span-to-font rewrite loop
    pub max_span_passes: usize,
    /// Images wider than this are clamped; also the width used when none is given
    pub max_image_width: u32,
    /// Height used for images that do not declare one
    pub default_image_height: u32,
    /// Color forced onto blocks that link to an in-document anchor
    pub link_color: String,
    /// Images whose `src` starts with this are dropped with a warning
    pub blocked_image_prefix: String,
    /// Font size of paragraphs and list items
    pub body_font_size: f32,
    /// Font sizes for `h1` through `h6`
    pub heading_sizes: [f32; 6],
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_span_passes: 5,
            max_image_width: 600,
            default_image_height: 200,
            link_color: "#1155cc".to_string(),
            blocked_image_prefix: "https://docs.google.com/drawings".to_string(),
            body_font_size: 14.0,
            heading_sizes: [32.0, 26.0, 22.0, 18.0, 16.0, 14.0],
        }
    }
}

impl ParseOptions {
    pub fn from_yaml(yaml: &str) -> DocResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Font size for a heading level. Levels come from `h1`..`h6` tags, so anything
    /// outside 1..=6 is clamped rather than rejected.
    pub fn heading_size(&self, level: u8) -> f32 {
        let idx = usize::from(level.clamp(1, 6)) - 1;
        self.heading_sizes[idx]
    }

    pub fn is_blocked_image(&self, src: &str) -> bool {
        !self.blocked_image_prefix.is_empty() && src.starts_with(&self.blocked_image_prefix)
    }
}
