#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to read order snapshot {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed order snapshot: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Order list endpoint reported failure")]
    Upstream,

    #[error("Order not found: {0}")]
    NotFound(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
