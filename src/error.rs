use thiserror::Error;

/// Closed set of failure kinds for a split run.
///
/// Callers branch on the variant, never on the identity of whatever library
/// error produced it. Parquet encoding failures on the write side fold into
/// `Io`.
#[derive(Debug, Error)]
pub enum SplitError {
    /// Input path does not exist. Surfaced before any output is produced.
    #[error("input file not found: {path}")]
    NotFound { path: String },

    /// Input exists but is not a well-formed parquet file.
    #[error("not a valid parquet file: {path}: {source}")]
    Format {
        path: String,
        source: parquet::errors::ParquetError,
    },

    /// Rejected before any read/write work begins.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Output-side failure. Fatal, no retry, shards already written stay.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for SplitError
pub type Result<T> = std::result::Result<T, SplitError>;
