use crate::builder::build_document_with_options;
use crate::error::{DocError, DocResult};
use crate::model::DocumentModel;
use crate::options::ParseOptions;
use std::collections::HashMap;

/// Where raw exported HTML comes from. Fetching, caching and retries belong to the
/// implementor; the parser only ever sees the finished string.
pub trait DocumentSource {
    fn fetch(&self, id: &str) -> DocResult<String>;
}

/// Fetch the document `id` from `source` and build its model.
pub fn load_document<S: DocumentSource + ?Sized>(
    source: &S,
    id: &str,
    options: &ParseOptions,
) -> DocResult<DocumentModel> {
    if id.trim().is_empty() {
        return Err(DocError::EmptyDocumentId);
    }
    let html = source.fetch(id)?;
    build_document_with_options(&html, options)
}

/// Documents held in memory, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    documents: HashMap<String, String>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, id: impl Into<String>, html: impl Into<String>) -> Self {
        self.insert(id, html);
        self
    }

    pub fn insert(&mut self, id: impl Into<String>, html: impl Into<String>) {
        self.documents.insert(id.into(), html.into());
    }
}

impl DocumentSource for StaticSource {
    fn fetch(&self, id: &str) -> DocResult<String> {
        self.documents
            .get(id)
            .cloned()
            .ok_or_else(|| DocError::Source(format!("document '{}' not found", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_id_is_rejected_before_fetching() {
        struct Unreachable;
        impl DocumentSource for Unreachable {
            fn fetch(&self, _id: &str) -> DocResult<String> {
                panic!("fetch must not be called for an empty id");
            }
        }

        let result = load_document(&Unreachable, "  ", &ParseOptions::default());
        assert_eq!(result, Err(DocError::EmptyDocumentId));
    }

    #[test]
    fn loads_from_static_source() {
        let source = StaticSource::new().with_document("doc1", "<body><p>hello</p></body>");
        let model = load_document(&source, "doc1", &ParseOptions::default()).unwrap();
        assert_eq!(model.blocks[0].markup, "hello");
    }

    #[test]
    fn missing_document_is_a_source_error() {
        let source = StaticSource::new();
        let result = load_document(&source, "nope", &ParseOptions::default());
        assert!(matches!(result, Err(DocError::Source(_))));
    }
}
