use crate::error::BuildWarning;
use crate::list::ListMarker;
use crate::stylesheet::ColorMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What a block renders as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockKind {
    /// `h1`..`h6`, level 1..=6
    Heading(u8),
    Paragraph,
    ListItem,
    Image,
    Divider,
}

/// Resolved text style of a block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub font_size: f32,
}

/// Image placeholder data. The renderer loads `src` later, asynchronously.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    pub src: String,
    /// Already clamped to the configured maximum
    pub width: u32,
    pub height: u32,
}

impl ImageInfo {
    pub fn placeholder_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// One styled block, ready to hand to a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderableBlock {
    pub kind: BlockKind,
    /// Sanitized inline markup (`font`, `b`, `i`, `u`, `br`, `a` only)
    pub markup: String,
    /// Position in layout order
    pub order: usize,
    /// Byte offset of the source element within `<body>`
    pub source_offset: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_target_id: Option<String>,
    pub style: BlockStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_marker: Option<ListMarker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageInfo>,
}

impl RenderableBlock {
    pub fn is_heading(&self) -> bool {
        matches!(self.kind, BlockKind::Heading(_))
    }

    pub fn is_link(&self) -> bool {
        self.link_target_id.is_some()
    }
}

/// Complete result of one build: styled blocks in layout order plus the anchor table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentModel {
    pub colors: ColorMap,
    pub blocks: Vec<RenderableBlock>,
    /// Anchor id → index into `blocks`. A repeated id points at the last block that
    /// declared it.
    pub anchors: HashMap<String, usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<BuildWarning>,
}

impl DocumentModel {
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RenderableBlock> {
        self.blocks.iter()
    }

    pub fn anchor_index(&self, id: &str) -> Option<usize> {
        self.anchors.get(id).copied()
    }

    /// Block registered under `id`
    pub fn resolve_anchor(&self, id: &str) -> Option<&RenderableBlock> {
        self.anchor_index(id).and_then(|idx| self.blocks.get(idx))
    }

    /// Block that `block` links to, if it links anywhere known
    pub fn link_target(&self, block: &RenderableBlock) -> Option<&RenderableBlock> {
        block
            .link_target_id
            .as_deref()
            .and_then(|id| self.resolve_anchor(id))
    }
}

impl<'a> IntoIterator for &'a DocumentModel {
    type Item = &'a RenderableBlock;
    type IntoIter = std::slice::Iter<'a, RenderableBlock>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}
