//! Crate-level error types.
//!
//! [`TallysheetError`] unifies every error source (configuration, order
//! fetch, filesystem, workbook encoding, JSON) behind a single enum so
//! callers can match on the variant they care about while still using the
//! `?` operator for easy propagation.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TallysheetError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum TallysheetError {
    /// A settings or schedule-state file could not be read or written.
    #[error("configuration error: {0}")]
    Config(String),

    /// The upstream order fetch failed. Not locally recoverable; the run
    /// is aborted and the next scheduled trigger retries from scratch.
    #[error("data source error: {0}")]
    DataSource(String),

    /// A filesystem operation on the output directory failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Workbook assembly or serialization failed.
    #[error("workbook error: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    /// JSON serialization or deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
