use thiserror::Error;

use crate::parse::ParseError;
use crate::{CombineError, ValidationError};

/// Unified error type covering rule creation, combination and I/O.
///
/// Returned by [`RuleBook::create_rule()`](crate::RuleBook::create_rule) and
/// convertible from every stage-specific error.
#[derive(Debug, Error)]
pub enum RulekitError {
    #[error("rule text is required")]
    MissingRule,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Combine(#[from] CombineError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
