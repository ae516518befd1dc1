mod error;
mod grammar;
mod lexer;
mod options;

pub use error::ParseError;
pub use grammar::parse_tokens;
pub use lexer::{tokenize, Token, TokenKind};
pub use options::ParseOptions;

use crate::Node;

/// Parse rule text into a [`Node`] with the default (lenient) options.
///
/// # Errors
///
/// Returns [`ParseError`] if a condition is malformed or the text ends where
/// a condition is required.
///
/// # Example
///
/// ```
/// use rulekit::{attr, create_rule};
///
/// let node = create_rule("age > 30").unwrap();
/// assert_eq!(node, attr("age").gt(30));
/// ```
pub fn create_rule(text: &str) -> Result<Node, ParseError> {
    parse_with(text, &ParseOptions::default())
}

/// Parse rule text into a [`Node`] with explicit options.
///
/// # Errors
///
/// Returns [`ParseError`] if the text is not a valid rule under `options`.
pub fn parse_with(text: &str, options: &ParseOptions) -> Result<Node, ParseError> {
    let tokens = tokenize(text);
    parse_tokens(&tokens, options)
}
