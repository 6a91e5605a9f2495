use thiserror::Error;

pub type DocResult<T> = Result<T, DocError>;

/// Fatal pipeline failures. Any of these aborts the build and no partial model is produced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocError {
    #[error("Empty document id: a document identifier is required")]
    EmptyDocumentId,

    #[error("Document is missing a <body> section")]
    MissingBody,

    #[error("Empty document: no elements found in <body>")]
    NoElements,

    #[error("Document source error: {0}")]
    Source(String),

    #[error("Invalid parse options: {0}")]
    InvalidOptions(String),
}

impl From<serde_yaml::Error> for DocError {
    fn from(err: serde_yaml::Error) -> Self {
        DocError::InvalidOptions(err.to_string())
    }
}

/// Non-fatal conditions collected while building a model. The affected element is dropped.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum BuildWarning {
    /// Image hosted on the drawing service, which cannot be rendered.
    BlockedImage { src: String, source_offset: usize },
}

impl std::fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildWarning::BlockedImage { src, source_offset } => write!(
                f,
                "Skipped unrenderable image at offset {}: {}",
                source_offset, src
            ),
        }
    }
}
