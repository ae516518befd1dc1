/// Parser configuration.
///
/// The default is lenient: a missing `)` is tolerated and tokens left over
/// after the top-level expression are ignored. [`ParseOptions::strict()`]
/// turns both into errors.
///
/// Group nesting is bounded in every mode; past [`ParseOptions::max_nesting()`]
/// open parentheses parsing fails with
/// [`ParseError::NestingTooDeep`](super::ParseError::NestingTooDeep).
///
/// # Example
///
/// ```
/// use rulekit::{parse_with, ParseError, ParseOptions};
///
/// assert!(parse_with("(age > 30", &ParseOptions::default()).is_ok());
///
/// let strict = ParseOptions::new().require_closing_paren(true);
/// assert!(matches!(
///     parse_with("(age > 30", &strict),
///     Err(ParseError::UnclosedGroup { .. })
/// ));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    require_closing_paren: bool,
    reject_trailing_tokens: bool,
    max_nesting: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            require_closing_paren: false,
            reject_trailing_tokens: false,
            max_nesting: Self::DEFAULT_MAX_NESTING,
        }
    }
}

impl ParseOptions {
    /// Default bound on nested parentheses.
    pub const DEFAULT_MAX_NESTING: usize = 256;

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Both leniencies disabled.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            require_closing_paren: true,
            reject_trailing_tokens: true,
            ..Self::default()
        }
    }

    /// Fail with [`ParseError::UnclosedGroup`](super::ParseError::UnclosedGroup)
    /// when a `(` has no matching `)`.
    #[must_use]
    pub fn require_closing_paren(mut self, yes: bool) -> Self {
        self.require_closing_paren = yes;
        self
    }

    /// Fail with [`ParseError::TrailingInput`](super::ParseError::TrailingInput)
    /// when tokens remain after the top-level expression.
    #[must_use]
    pub fn reject_trailing_tokens(mut self, yes: bool) -> Self {
        self.reject_trailing_tokens = yes;
        self
    }

    /// Maximum number of simultaneously open groups.
    #[must_use]
    pub fn with_max_nesting(mut self, depth: usize) -> Self {
        self.max_nesting = depth;
        self
    }

    #[must_use]
    pub fn requires_closing_paren(&self) -> bool {
        self.require_closing_paren
    }

    #[must_use]
    pub fn rejects_trailing_tokens(&self) -> bool {
        self.reject_trailing_tokens
    }

    #[must_use]
    pub fn max_nesting(&self) -> usize {
        self.max_nesting
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_lenient() {
        let opts = ParseOptions::default();
        assert!(!opts.requires_closing_paren());
        assert!(!opts.rejects_trailing_tokens());
        assert_eq!(opts.max_nesting(), ParseOptions::DEFAULT_MAX_NESTING);
    }

    #[test]
    fn strict_keeps_nesting_bound() {
        assert_eq!(
            ParseOptions::strict().max_nesting(),
            ParseOptions::DEFAULT_MAX_NESTING
        );
        assert_eq!(ParseOptions::strict().with_max_nesting(4).max_nesting(), 4);
    }

    #[test]
    fn strict_enables_both() {
        let opts = ParseOptions::strict();
        assert!(opts.requires_closing_paren());
        assert!(opts.rejects_trailing_tokens());
    }

    #[test]
    fn builder_sets_individually() {
        let opts = ParseOptions::new().reject_trailing_tokens(true);
        assert!(!opts.requires_closing_paren());
        assert!(opts.rejects_trailing_tokens());
        assert_eq!(opts.reject_trailing_tokens(false), ParseOptions::default());
    }
}
