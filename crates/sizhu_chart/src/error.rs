//! Error types for engine construction and raw-input calculation.

use sizhu_config::ConfigError;
use sizhu_terms::TermDataError;
use thiserror::Error;

use crate::validate::ValidationErrors;

/// Errors surfaced by the chart crate.
///
/// Calculation on a validated [`BirthInput`](crate::BirthInput) never fails;
/// these come from building an engine or from rejected raw input.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ChartError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("solar-term data error: {0}")]
    TermData(String),
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
}

impl From<ConfigError> for ChartError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}

impl From<TermDataError> for ChartError {
    fn from(e: TermDataError) -> Self {
        Self::TermData(e.to_string())
    }
}
