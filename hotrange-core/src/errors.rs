use thiserror::Error;

pub type Result<T> = std::result::Result<T, HotRangeError>;

#[derive(Error, Debug)]
pub enum HotRangeError {
    #[error("Malformed snapshot: {0}")]
    MalformedInput(String),

    #[error("No schema object found for range {range_id}")]
    NotFound { range_id: String },

    #[error("Invalid range id: {0}")]
    InvalidRangeId(String),

    #[error("Catalog backend error: {0}")]
    Catalog(#[from] Box<dyn std::error::Error + Send + Sync>),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
