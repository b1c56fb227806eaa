use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Not a document path (expected an even number of segments): {0}")]
    NotADocumentPath(String),

    #[error("Not a collection path (expected an odd number of segments): {0}")]
    NotACollectionPath(String),

    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Field is not an array: {0}")]
    TypeMismatch(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
