//! Stop store error types.

use std::path::PathBuf;

/// Errors that can occur when reading stop metadata.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The snapshot file could not be read
    #[error("failed to read stop snapshot {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The snapshot is not valid JSON for the expected layout
    #[error("stop snapshot parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The store has no table with this name
    #[error("unknown stop table: {table}")]
    UnknownTable { table: String },
}
