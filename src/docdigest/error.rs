use thiserror::Error;

#[derive(Error, Debug)]
pub enum DigestError {
    #[error("Invalid or duplicate project name: {0:?}")]
    InvalidName(String),

    #[error("Unknown project: {0}")]
    UnknownProject(String),

    #[error("Invalid section position {index} (project has {len} sections)")]
    InvalidIndex { index: usize, len: usize },

    #[error("Section not found: {0}")]
    SectionNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Editor error: {0}")]
    Editor(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, DigestError>;
