use crate::model::{BlockKind, DocumentModel, ImageInfo, RenderableBlock};

/// Widget-side consumer of a [`DocumentModel`].
///
/// Markup handed to the text methods uses only `font`, `b`, `i`, `u`, `br` and `a`,
/// which the implementor is expected to treat as native rich text.
pub trait Renderer {
    /// Larger bold text; `block.style.font_size` carries the size for `level`
    fn heading(&mut self, block: &RenderableBlock, level: u8);
    fn paragraph(&mut self, block: &RenderableBlock);
    /// `block.markup` already starts with the bullet or ordinal
    fn list_item(&mut self, block: &RenderableBlock);
    /// Placeholder of `image.placeholder_size()`; `image.src` is loaded later
    fn image(&mut self, block: &RenderableBlock, image: &ImageInfo);
    fn divider(&mut self, block: &RenderableBlock);
}

/// Feed every block to `renderer` in layout order.
pub fn render_document<R: Renderer + ?Sized>(model: &DocumentModel, renderer: &mut R) {
    for block in model {
        match block.kind {
            BlockKind::Heading(level) => renderer.heading(block, level),
            BlockKind::Paragraph => renderer.paragraph(block),
            BlockKind::ListItem => renderer.list_item(block),
            BlockKind::Image => match &block.image {
                Some(image) => renderer.image(block, image),
                None => log::warn!("Image block {} has no image data", block.order),
            },
            BlockKind::Divider => renderer.divider(block),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_document;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl Renderer for Recorder {
        fn heading(&mut self, block: &RenderableBlock, level: u8) {
            self.calls.push(format!("h{}:{}", level, block.markup));
        }
        fn paragraph(&mut self, block: &RenderableBlock) {
            self.calls.push(format!("p:{}", block.markup));
        }
        fn list_item(&mut self, block: &RenderableBlock) {
            self.calls.push(format!("li:{}", block.markup));
        }
        fn image(&mut self, _block: &RenderableBlock, image: &ImageInfo) {
            let (w, h) = image.placeholder_size();
            self.calls.push(format!("img:{}x{}:{}", w, h, image.src));
        }
        fn divider(&mut self, _block: &RenderableBlock) {
            self.calls.push("hr".to_string());
        }
    }

    #[test]
    fn renders_in_layout_order() {
        let html = r#"<body><h3>T</h3><p>a</p><hr><img src="i.png"><ul><li>x</li></ul></body>"#;
        let model = build_document(html).unwrap();
        let mut recorder = Recorder::default();
        render_document(&model, &mut recorder);

        assert_eq!(
            recorder.calls,
            vec!["h3:T", "p:a", "hr", "img:600x200:i.png", "p:", "li:\u{2022} x"]
        );
    }
}
