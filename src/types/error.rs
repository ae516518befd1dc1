use thiserror::Error;

use crate::parse::ParseError;

/// A rule text rejected by the single-condition gate of
/// [`validate_rule()`](crate::validate_rule).
#[derive(Debug, Error, PartialEq)]
#[error("invalid rule syntax: '{rule}' is not a single `attribute <op> number` condition")]
pub struct ValidationError {
    pub rule: String,
}

/// A rule text in a combination that failed to parse.
#[derive(Debug, Error, PartialEq)]
#[error("rule #{index} ('{rule}'): {source}")]
pub struct CombineError {
    /// Position of the failing text in the input sequence, blank entries included.
    pub index: usize,
    pub rule: String,
    pub source: ParseError,
}
