//! Analysis error types.
//!
//! Every failure mode has a named variant. No stringly-typed errors.
//!
//! Numeric edge cases (division by zero, unparseable cells) are never
//! errors; they are normalized to zero by the loader and `util::safe_div`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("data source not readable: {path}: {source}")]
    DataSource {
        path: String,
        source: std::io::Error,
    },

    #[error("malformed csv data: {0}")]
    Csv(#[from] csv::Error),

    /// The strict-schema policy: every recognized column must be present
    /// in the header, validated once at load time. Downstream stages are
    /// total functions over typed records and never re-check the schema.
    #[error("required columns absent from header: {}", .columns.join(", "))]
    MissingColumns { columns: Vec<String> },
}

/// Result type alias for analysis operations.
pub type DashboardResult<T> = Result<T, DashboardError>;
