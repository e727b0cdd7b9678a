//! Unified error type for the join engine
//!
//! Structural side-file problems, numeric comparison failures and row-source
//! failures each get their own category so callers can match precisely.

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum JoinError {
    /// Structural problems in the side-file discovered while building the
    /// index: missing header, duplicate or missing key column, short row.
    /// Always fatal to construction; no partial index escapes.
    #[error("malformed side-file: {message}")]
    MalformedInput {
        message: String,
        /// 1-based data-row number, when the problem is tied to a row
        line: Option<usize>,
        /// Offending column name, when the problem is tied to a column
        column: Option<String>,
    },

    /// A numeric-mode comparison was asked to order two non-identical values
    /// that do not both parse as numbers. Surfaces at comparison time,
    /// during construction or during a query probe.
    #[error("numeric comparison failed: {message}")]
    Parse { message: String, value: String },

    /// The underlying row source failed (I/O, CSV decoding).
    #[error("row source error: {message}")]
    Source { message: String },
}

impl JoinError {
    pub fn no_header() -> Self {
        Self::MalformedInput {
            message: "side-file has no header row".to_string(),
            line: None,
            column: None,
        }
    }

    pub fn duplicate_key_column(column: impl Into<String>) -> Self {
        let column = column.into();
        Self::MalformedInput {
            message: format!("duplicate key column in header: {column}"),
            line: None,
            column: Some(column),
        }
    }

    pub fn missing_key_column(column: impl Into<String>) -> Self {
        let column = column.into();
        Self::MalformedInput {
            message: format!("key column \"{column}\" is missing from header"),
            line: None,
            column: Some(column),
        }
    }

    pub fn short_row(line: usize, actual: usize, expected: usize) -> Self {
        Self::MalformedInput {
            message: format!("row {line}: only {actual} values defined, expected {expected}"),
            line: Some(line),
            column: None,
        }
    }

    pub fn numeric_parse(value: impl Into<String>) -> Self {
        let value = value.into();
        Self::Parse {
            message: format!("cannot parse \"{value}\" as a number"),
            value,
        }
    }
}

impl From<csv::Error> for JoinError {
    fn from(err: csv::Error) -> Self {
        Self::Source {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for JoinError {
    fn from(err: std::io::Error) -> Self {
        Self::Source {
            message: err.to_string(),
        }
    }
}

/// Result type alias for join-engine operations
pub type JoinResult<T> = Result<T, JoinError>;
