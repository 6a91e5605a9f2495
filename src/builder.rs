//! Turns scanned elements into styled, ordered blocks.

use crate::body::extract_body;
use crate::entities::normalize;
use crate::error::{BuildWarning, DocError, DocResult};
use crate::inline::{apply_class_colors, filter_inline_tags};
use crate::list::list_marker;
use crate::model::{BlockKind, BlockStyle, DocumentModel, ImageInfo, RenderableBlock};
use crate::options::ParseOptions;
use crate::scanner::{scan, RawElement};
use crate::stylesheet::{self, ColorMap};
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Everything the per-element stages read: the document's colors and the options.
/// Built once per document, never mutated.
#[derive(Debug, Clone)]
pub struct ParseContext<'o> {
    colors: ColorMap,
    options: &'o ParseOptions,
}

impl<'o> ParseContext<'o> {
    pub fn new(html: &str, options: &'o ParseOptions) -> Self {
        Self {
            colors: stylesheet::resolve(html),
            options,
        }
    }

    pub fn with_colors(colors: ColorMap, options: &'o ParseOptions) -> Self {
        Self { colors, options }
    }

    pub fn colors(&self) -> &ColorMap {
        &self.colors
    }

    pub fn options(&self) -> &ParseOptions {
        self.options
    }
}

/// Build a model with default options.
pub fn build_document(html: &str) -> DocResult<DocumentModel> {
    build_document_with_options(html, &ParseOptions::default())
}

/// Build a model from raw exporter HTML.
///
/// Fails on a missing `<body>` or a body without any recognizable element; nothing is
/// returned in either case.
pub fn build_document_with_options(html: &str, options: &ParseOptions) -> DocResult<DocumentModel> {
    let body = extract_body(html)?;
    let context = ParseContext::new(html, options);

    let elements = scan(body);
    if elements.is_empty() {
        return Err(DocError::NoElements);
    }

    Ok(DocumentModelBuilder::new(&context).build(&elements))
}

/// Accumulates blocks, anchors and warnings for a single document.
pub struct DocumentModelBuilder<'c, 'o> {
    context: &'c ParseContext<'o>,
    blocks: Vec<RenderableBlock>,
    anchors: HashMap<String, usize>,
    warnings: Vec<BuildWarning>,
}

impl<'c, 'o> DocumentModelBuilder<'c, 'o> {
    pub fn new(context: &'c ParseContext<'o>) -> Self {
        Self {
            context,
            blocks: Vec::new(),
            anchors: HashMap::new(),
            warnings: Vec::new(),
        }
    }

    /// `elements` must already be in source order, as [`scan`] returns them.
    pub fn build(mut self, elements: &[RawElement]) -> DocumentModel {
        for index in 0..elements.len() {
            let Some(mut block) = self.build_block(elements, index) else {
                continue;
            };
            block.order = self.blocks.len();
            if let Some(id) = &block.anchor_id {
                self.anchors.insert(id.clone(), block.order);
            }
            self.blocks.push(block);
        }

        log::debug!(
            "builder: {} elements -> {} blocks, {} anchors, {} warnings",
            elements.len(),
            self.blocks.len(),
            self.anchors.len(),
            self.warnings.len()
        );

        DocumentModel {
            colors: self.context.colors.clone(),
            blocks: self.blocks,
            anchors: self.anchors,
            warnings: self.warnings,
        }
    }

    fn build_block(&mut self, elements: &[RawElement], index: usize) -> Option<RenderableBlock> {
        let element = &elements[index];
        let options = self.context.options;

        let mut block = RenderableBlock {
            kind: BlockKind::Paragraph,
            markup: String::new(),
            order: 0,
            source_offset: element.source_offset,
            anchor_id: element.id().map(str::to_string),
            link_target_id: None,
            style: BlockStyle {
                color: None,
                font_size: options.body_font_size,
            },
            list_marker: None,
            image: None,
        };

        match element.tag.as_str() {
            "hr" => {
                block.kind = BlockKind::Divider;
                return Some(block);
            }
            "img" => {
                let src = element.src.clone().unwrap_or_default();
                if options.is_blocked_image(&src) {
                    log::warn!("Skipping unrenderable drawing image: {}", src);
                    self.warnings.push(BuildWarning::BlockedImage {
                        src,
                        source_offset: element.source_offset,
                    });
                    return None;
                }
                block.kind = BlockKind::Image;
                block.image = Some(self.image_info(element, src));
                return Some(block);
            }
            _ if element.is_list_container() => {
                // The items carry the text; the container is an unstyled wrapper.
                return Some(block);
            }
            "li" => {
                block.kind = BlockKind::ListItem;
                block.list_marker = Some(list_marker(elements, index));
            }
            tag => {
                if let Some(level) = heading_level(tag) {
                    block.kind = BlockKind::Heading(level);
                    block.style.font_size = options.heading_size(level);
                }
            }
        }

        let colors = &self.context.colors;
        let text = normalize(&element.content);
        let text = apply_class_colors(&text, colors, options.max_span_passes);
        let text = filter_inline_tags(&text);

        block.markup = match &block.list_marker {
            Some(marker) if text.is_empty() => marker.label.clone(),
            Some(marker) => format!("{} {}", marker.label, text),
            None => text,
        };

        block.style.color = colors
            .first_class_color(element.class_list())
            .or_else(|| colors.tag_color(&element.tag))
            .map(str::to_string);

        if let Some(target) = internal_link_target(&element.content) {
            block.style.color = Some(options.link_color.clone());
            block.markup = format!("<u>{}</u>", block.markup);
            block.link_target_id = Some(target.to_string());
        }

        Some(block)
    }

    fn image_info(&self, element: &RawElement, src: String) -> ImageInfo {
        let options = self.context.options;
        let width = image_dimension(element, "width")
            .map(|w| w.min(options.max_image_width))
            .unwrap_or(options.max_image_width);
        let height = image_dimension(element, "height").unwrap_or(options.default_image_height);
        ImageInfo { src, width, height }
    }
}

/// `h1`..`h6` → 1..=6
pub fn heading_level(tag: &str) -> Option<u8> {
    match tag.as_bytes() {
        [b'h' | b'H', d @ b'1'..=b'6'] => Some(d - b'0'),
        _ => None,
    }
}

/// Fragment id of the first `<a href="#id">` in `content`
pub fn internal_link_target(content: &str) -> Option<&str> {
    static LINK_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = LINK_REGEX.get_or_init(|| {
        Regex::new(r#"(?i)<a\s[^>]*?href\s*=\s*["']#([^"'\s]+)["']"#).unwrap()
    });
    re.captures(content).and_then(|caps| caps.get(1)).map(|m| m.as_str())
}

/// Pixel size from a `width="N"`-style attribute, falling back to `width: Npx` in the
/// inline style.
fn image_dimension(element: &RawElement, name: &str) -> Option<u32> {
    static STYLE_SIZE_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = STYLE_SIZE_REGEX.get_or_init(|| {
        Regex::new(r"(?i)(?:^|[;\s])(width|height)\s*:\s*([0-9]+(?:\.[0-9]+)?)px").unwrap()
    });

    let from_attribute = element
        .attribute(name)
        .and_then(|v| v.trim().trim_end_matches("px").parse::<f32>().ok());

    let value = from_attribute.or_else(|| {
        let style = element.attribute("style")?;
        re.captures_iter(style)
            .find(|caps| caps[1].eq_ignore_ascii_case(name))
            .and_then(|caps| caps[2].parse::<f32>().ok())
    })?;

    (value.is_finite() && value >= 0.0).then(|| value.round() as u32)
}
