//! Error handling for colframe
//!
//! This module defines the error type shared by every part of the engine:
//! the CSV tokenizer, table construction, grouping, aggregation and joins.
//!
//! The module uses thiserror to minimize boilerplate code. Every failure is
//! surfaced to the caller immediately; no operation returns a partial result.

use thiserror::Error;

/// ColframeError represents all possible errors that can occur in colframe
///
/// The first six variants form the engine's core taxonomy. The remaining ones
/// cover the I/O, CSV writing and command-line boundaries.
#[derive(Error, Debug)]
pub enum ColframeError {
    /// A quote character appeared inside a field that did not start with one
    #[error("Malformed field on line {line}: unexpected quote inside unquoted field")]
    MalformedField { line: usize },

    /// Input ended while a quoted field was still open
    #[error("Unterminated quoted field starting on line {line}")]
    UnterminatedQuote { line: usize },

    /// Columns of unequal length, or a repeated column name
    #[error("Schema error: {0}")]
    SchemaError(String),

    /// One or more referenced columns don't exist in a table
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// Aggregator name outside the supported set
    #[error("Unknown aggregator '{0}'")]
    UnknownAggregator(String),

    /// A numeric aggregator met a value that is not a number
    #[error("Type conversion error: {0}")]
    TypeConversionError(String),

    /// Join type name outside inner/left/right/outer
    #[error("Unknown join type '{0}'")]
    UnknownJoinType(String),

    /// Malformed command-line or configuration specification
    #[error("Invalid specification: {0}")]
    InvalidSpec(String),

    /// Error during file system operations (reading/writing files)
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error while writing delimited output
    #[error("CSV output error: {0}")]
    CsvError(#[from] csv::Error),

    /// Invalid regular expression in a match filter
    #[error("Invalid pattern: {0}")]
    RegexError(#[from] regex::Error),
}

/// Result type alias for operations that can produce a ColframeError
pub type ColframeResult<T> = std::result::Result<T, ColframeError>;
