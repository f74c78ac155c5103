use thiserror::Error;

/// Rejections raised by the calling layer before a payload reaches the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Only JPG/PNG allowed (got {0})")]
    UnsupportedImageType(String),

    #[error("Image size ({size} bytes) exceeds the maximum allowed size of {max} bytes")]
    ImageTooLarge { size: u64, max: u64 },

    #[error("Invalid publish date: {0} (expected YYYY-MM-DD)")]
    InvalidPublishDate(String),
}

/// The stored value is not a JSON array. `RecordStore::load` recovers from
/// this by treating the collection as empty; it is never returned from `load`.
/// Backend I/O failures are not read errors and surface as [`BlogError`].
#[derive(Error, Debug)]
pub enum StorageReadError {
    #[error("stored collection is not a JSON array: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum BlogError {
    #[error("Record not found: {0}")]
    RecordNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Storage read error: {0}")]
    StorageRead(#[from] StorageReadError),
}

pub type Result<T> = std::result::Result<T, BlogError>;
