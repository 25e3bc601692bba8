use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Every candidate source failed to fetch, decode, or yield records.
    /// Carries every source attempted, in order.
    #[error("no usable data source; tried: {}", attempted.join(", "))]
    SourceUnavailable { attempted: Vec<String> },
    #[error("snapshot i/o failed: {0}")]
    SnapshotIo(#[from] std::io::Error),
    #[error("snapshot is not valid record JSON: {0}")]
    SnapshotFormat(#[from] serde_json::Error),
}
