//! In-memory rule storage with a validated creation boundary.
//!
//! Only raw rule text is kept; trees are rebuilt by re-parsing whenever they
//! are asked for.

use std::fmt;

use tracing::{debug, info};

use crate::parse::{parse_with, ParseOptions};
use crate::{combine_with, validate_rule, Attributes, CombineError, Node, ParseError, RulekitError};

/// Identifier of a stored rule, assigned in insertion order starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuleId(u64);

impl RuleId {
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Stored rule texts plus the attribute records submitted for evaluation.
///
/// # Example
///
/// ```
/// use rulekit::{Attributes, RuleBook};
///
/// let mut book = RuleBook::new();
/// book.create_rule("age > 30").unwrap();
/// book.create_rule("salary < 50000").unwrap();
///
/// let combined = book.combined().unwrap().unwrap();
/// let attrs = Attributes::new().set("age", 35_i64).set("salary", 40_000_i64);
/// assert!(combined.matches(&attrs));
/// ```
#[derive(Debug, Default)]
pub struct RuleBook {
    rules: Vec<(RuleId, String)>,
    records: Vec<Attributes>,
    options: ParseOptions,
    next_id: u64,
}

impl RuleBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `options` whenever stored text is parsed.
    #[must_use]
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Create a single rule: reject empty text, apply the single-condition
    /// gate, parse, then store the raw text.
    ///
    /// # Errors
    ///
    /// [`RulekitError::MissingRule`] for empty or whitespace-only text,
    /// [`RulekitError::Validation`] when the gate rejects it, and
    /// [`RulekitError::Parse`] when it does not parse.
    pub fn create_rule(&mut self, text: &str) -> Result<(RuleId, Node), RulekitError> {
        if text.trim().is_empty() {
            return Err(RulekitError::MissingRule);
        }
        validate_rule(text)?;
        let node = parse_with(text, &self.options)?;

        self.next_id += 1;
        let id = RuleId(self.next_id);
        self.rules.push((id, text.to_owned()));
        info!(%id, rule = text, "stored rule");
        Ok((id, node))
    }

    /// Raw text of a stored rule.
    #[must_use]
    pub fn get(&self, id: RuleId) -> Option<&str> {
        self.rules
            .iter()
            .find(|(rule_id, _)| *rule_id == id)
            .map(|(_, text)| text.as_str())
    }

    /// Rebuild the tree of a stored rule.
    #[must_use]
    pub fn ast(&self, id: RuleId) -> Option<Result<Node, ParseError>> {
        self.get(id).map(|text| {
            debug!(%id, "re-parsing stored rule");
            parse_with(text, &self.options)
        })
    }

    /// AND-fold every stored rule, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`CombineError`] if a stored text no longer parses under the
    /// current options.
    pub fn combined(&self) -> Result<Option<Node>, CombineError> {
        combine_with(self.rules.iter().map(|(_, text)| text), &self.options)
    }

    /// Store a submitted attribute record verbatim.
    pub fn record_attributes(&mut self, attributes: Attributes) {
        self.records.push(attributes);
    }

    #[must_use]
    pub fn records(&self) -> &[Attributes] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = (RuleId, &str)> {
        self.rules.iter().map(|(id, text)| (*id, text.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
