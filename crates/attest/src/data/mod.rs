//! Row sources for data-driven tests.
//!
//! [`CsvData`] reads rows from a delimited file; [`DatabaseData`] reads them
//! through an injected [`DatabaseConnection`].

mod csv_file;
mod database;

#[cfg(test)]
mod tests;

pub use csv_file::CsvData;
pub use database::{ConnectionKind, DatabaseConnection, DatabaseData};

use thiserror::Error;

/// A row of string cells.
pub type Row = Vec<String>;

/// Errors raised while reading test data.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("query failed: {0}")]
    Query(String),
}

pub type DataResult<T> = Result<T, DataError>;
