use std::path::PathBuf;

use super::validation::FieldError;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("book with id {0} not found")]
    NotFound(u64),

    #[error("book with id {0} already exists")]
    AlreadyExists(u64),

    #[error("no identifier left to assign, the largest id is already taken")]
    IdsExhausted,

    #[error(transparent)]
    Validation(#[from] FieldError),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode books: {0}")]
    Encode(#[from] serde_json::Error),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}
