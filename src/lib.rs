//! # docblocks
//!
//! Turns the HTML export of a word-processor document into an ordered list of styled
//! blocks (headings, paragraphs, list items, images, dividers) that any widget toolkit
//! can render.
//!
//! ## Pipeline
//! - `<style>` rules are reduced to tag and class text colors ([`ColorMap`])
//! - the `<body>` slice is scanned three times (blocks, images, dividers) and merged
//!   back into source order
//! - each element's inner markup has its entities normalized, classed spans rewritten
//!   to `<font color>`, and everything but `font b i u br a` stripped
//! - list items get a bullet or ordinal from the nearest preceding `ul`/`ol`
//! - internal links (`href="#id"`) and anchors (`id="..."`) are recorded
//!
//! ## Example
//! ```ignore
//! use docblocks::build_document;
//!
//! let html = r#"
//! <html><head><style>.c1{color:#990000}</style></head>
//! <body>
//!   <h1 id="h.intro">Intro</h1>
//!   <p class="c1">Hello &ldquo;world&rdquo;</p>
//!   <p><a href="#h.intro">Back to top</a></p>
//! </body></html>
//! "#;
//!
//! let model = build_document(html).expect("Failed to build document");
//! let top = model.link_target(&model.blocks[2]);
//! ```

pub mod body;
pub mod builder;
pub mod entities;
pub mod error;
pub mod inline;
pub mod list;
pub mod model;
pub mod options;
pub mod render;
pub mod scanner;
pub mod source;
pub mod stylesheet;

// --- Core types ---
pub use builder::{DocumentModelBuilder, ParseContext};
pub use error::{BuildWarning, DocError, DocResult};
pub use list::ListMarker;
pub use model::{BlockKind, BlockStyle, DocumentModel, ImageInfo, RenderableBlock};
pub use options::ParseOptions;
pub use scanner::RawElement;
pub use stylesheet::ColorMap;

// --- Collaborator seams ---
pub use render::{render_document, Renderer};
pub use source::{load_document, DocumentSource, StaticSource};

/// Build a document model with default options
pub fn build_document(html: &str) -> DocResult<DocumentModel> {
    builder::build_document(html)
}

/// Build a document model with custom options
pub fn build_document_with_options(html: &str, options: &ParseOptions) -> DocResult<DocumentModel> {
    builder::build_document_with_options(html, options)
}
