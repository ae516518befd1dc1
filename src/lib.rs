//! A small rule-expression engine.
//!
//! Rule text such as `age > 30 AND department = 'Sales'` is tokenized,
//! parsed into a binary [`Node`] tree, optionally AND-combined with other
//! rules, and evaluated against a flat [`Attributes`] map.
//!
//! ```
//! use rulekit::{combine, Attributes};
//!
//! let rule = combine(["age > 30", "salary < 50000"]).unwrap().unwrap();
//! let attrs = Attributes::new().set("age", 35_i64).set("salary", 40_000_i64);
//! assert!(rule.matches(&attrs));
//! ```

mod book;
mod combine;
mod error;
mod evaluate;
pub mod parse;
mod types;
mod validate;

pub use book::{RuleBook, RuleId};
pub use combine::{combine, combine_with};
pub use error::RulekitError;
pub use evaluate::{evaluate, evaluate_detailed, evaluate_json, EvalHook, Evaluator, TracingHook};
pub use parse::{create_rule, parse_with, tokenize, ParseError, ParseOptions, Token, TokenKind};
pub use types::{
    attr, from_json_str, AttrExpr, Attributes, CombineError, EvaluationReport, EvaluationStep,
    Node, Op, ValidationError, Value, WireError,
};
pub use validate::{is_valid_rule, validate_rule};
