use tracing::debug;

use crate::parse::{parse_with, ParseOptions};
use crate::{CombineError, Node};

/// Parse several rule texts and AND-fold them, left to right, into one tree.
///
/// Texts are trimmed; blank ones are skipped. The single-condition gate is
/// not applied, so every text may use the full grammar. Returns `Ok(None)`
/// when no non-blank text was supplied.
///
/// # Errors
///
/// Returns [`CombineError`] for the first text that fails to parse.
///
/// # Example
///
/// ```
/// use rulekit::{attr, combine};
///
/// let node = combine(["age > 30", "  ", "salary < 50000"]).unwrap();
/// assert_eq!(node, Some(attr("age").gt(30).and(attr("salary").lt(50000))));
/// assert_eq!(combine(["", " "]).unwrap(), None);
/// ```
pub fn combine<I, S>(texts: I) -> Result<Option<Node>, CombineError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    combine_with(texts, &ParseOptions::default())
}

/// [`combine`] with explicit parse options.
///
/// # Errors
///
/// Returns [`CombineError`] for the first text that fails to parse.
pub fn combine_with<I, S>(texts: I, options: &ParseOptions) -> Result<Option<Node>, CombineError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut combined: Option<Node> = None;

    for (index, text) in texts.into_iter().enumerate() {
        let rule = text.as_ref().trim();
        if rule.is_empty() {
            continue;
        }
        let node = parse_with(rule, options).map_err(|source| CombineError {
            index,
            rule: rule.to_owned(),
            source,
        })?;
        debug!(index, rule, ast = %node, "parsed rule for combination");

        combined = Some(match combined {
            None => node,
            Some(acc) => acc.and(node),
        });
    }

    if let Some(node) = &combined {
        debug!(ast = %node, "combined rules");
    }
    Ok(combined)
}
