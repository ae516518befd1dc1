use thiserror::Error;

/// Errors produced when parsing rule text.
///
/// `position` is the index of the offending token and `offset` its byte
/// offset in the source text (the text length when input ran out).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected a comparison operator and value after '{term}' (token {position}, byte {offset})")]
    MalformedTerm {
        term: String,
        position: usize,
        offset: usize,
    },

    #[error("unexpected end of input: expected a condition (token {position}, byte {offset})")]
    UnexpectedEnd { position: usize, offset: usize },

    #[error("missing ')' for the group opened at token {position} (byte {offset})")]
    UnclosedGroup { position: usize, offset: usize },

    #[error("groups nested deeper than {limit} at token {position} (byte {offset})")]
    NestingTooDeep {
        limit: usize,
        position: usize,
        offset: usize,
    },

    #[error("unexpected trailing token '{token}' (token {position}, byte {offset})")]
    TrailingInput {
        token: String,
        position: usize,
        offset: usize,
    },
}

impl ParseError {
    /// Token index the error points at.
    #[must_use]
    pub fn position(&self) -> usize {
        match self {
            ParseError::MalformedTerm { position, .. }
            | ParseError::UnexpectedEnd { position, .. }
            | ParseError::UnclosedGroup { position, .. }
            | ParseError::NestingTooDeep { position, .. }
            | ParseError::TrailingInput { position, .. } => *position,
        }
    }

    /// Byte offset in the source text the error points at.
    #[must_use]
    pub fn offset(&self) -> usize {
        match self {
            ParseError::MalformedTerm { offset, .. }
            | ParseError::UnexpectedEnd { offset, .. }
            | ParseError::UnclosedGroup { offset, .. }
            | ParseError::NestingTooDeep { offset, .. }
            | ParseError::TrailingInput { offset, .. } => *offset,
        }
    }
}
