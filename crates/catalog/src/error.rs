use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or writing catalog files.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    /// Reading or writing a file failed.
    #[error("failed to access '{path}': {source}")]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A file was not valid catalog JSON.
    #[error("invalid catalog JSON in '{path}': {source}")]
    Json {
        /// File being parsed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// The raw catalog contained no usable records.
    #[error("catalog contains no named records")]
    EmptyCatalog,
}
