//! Single-condition gate applied when a rule is created on its own.
//!
//! It is narrower than the parser: it accepts exactly one
//! `attribute <op> integer` comparison and rejects `AND`/`OR`, parentheses and
//! quoted values, all of which [`create_rule`](crate::create_rule) and
//! [`combine`](crate::combine) accept. The combiner never consults it.

use std::sync::LazyLock;

use regex::Regex;

use crate::ValidationError;

static SINGLE_CONDITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z_]+\s*[><=]+\s*\d+$").expect("single-condition pattern is valid")
});

/// Whether `text` is a single atomic numeric comparison such as `age > 30`.
#[must_use]
pub fn is_valid_rule(text: &str) -> bool {
    SINGLE_CONDITION.is_match(text)
}

/// Raising form of [`is_valid_rule`].
///
/// # Errors
///
/// Returns [`ValidationError`] carrying the rejected text.
pub fn validate_rule(text: &str) -> Result<(), ValidationError> {
    if is_valid_rule(text) {
        Ok(())
    } else {
        Err(ValidationError {
            rule: text.to_owned(),
        })
    }
}
