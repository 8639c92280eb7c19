//! Error types for solar-term dataset loading.

use thiserror::Error;

/// Errors from reading or parsing a solar-term dataset.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum TermDataError {
    /// I/O error opening or reading the file.
    #[error("I/O error: {0}")]
    Io(String),
    /// Malformed CSV or a field that failed to deserialize.
    #[error("CSV error: {0}")]
    Csv(String),
    /// Term name not recognised in any accepted spelling.
    #[error("line {line}: unknown solar term {name:?}")]
    UnknownTerm { line: u64, name: String },
    /// The same (year, term) key appears twice.
    #[error("line {line}: duplicate entry for {year} {term}")]
    Duplicate { line: u64, year: i32, term: String },
    /// The instant or date does not fall in the row's year.
    #[error("line {line}: {term} {year} dated outside its year")]
    YearMismatch { line: u64, year: i32, term: String },
}

impl From<std::io::Error> for TermDataError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<csv::Error> for TermDataError {
    fn from(e: csv::Error) -> Self {
        Self::Csv(e.to_string())
    }
}
