use std::cell::{Cell, RefCell};
use std::cmp::Ordering;
use std::time::Instant;

use tracing::{debug, trace, warn};

use crate::{Attributes, EvaluationReport, EvaluationStep, Node, Op, Value};

/// Observer invoked while a tree is evaluated.
///
/// Both callbacks default to no-ops. `on_operand` fires when a leaf has been
/// resolved, `on_operator` after an operator has been applied to its two
/// already-evaluated children, so callbacks arrive in post-order.
pub trait EvalHook {
    fn on_operand(&self, _name: &str, _resolved: &Value) {}

    fn on_operator(&self, _op: &Op, _left: &Value, _right: &Value, _result: &Value) {}
}

/// Forwards every evaluation step to `tracing` at `TRACE` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingHook;

impl EvalHook for TracingHook {
    fn on_operand(&self, name: &str, resolved: &Value) {
        trace!(operand = name, resolved = %resolved, "resolved operand");
    }

    fn on_operator(&self, op: &Op, left: &Value, right: &Value, result: &Value) {
        trace!(op = %op, left = %left, right = %right, result = %result, "applied operator");
    }
}

/// Tree-walking evaluator, optionally carrying an [`EvalHook`].
///
/// ```
/// use rulekit::{create_rule, Attributes, Evaluator, TracingHook, Value};
///
/// let rule = create_rule("age > 30").unwrap();
/// let attrs = Attributes::new().set("age", 35_i64);
/// let result = Evaluator::new().with_hook(&TracingHook).evaluate(&rule, &attrs);
/// assert_eq!(result, Value::Bool(true));
/// ```
#[derive(Clone, Copy, Default)]
pub struct Evaluator<'h> {
    hook: Option<&'h dyn EvalHook>,
}

impl<'h> Evaluator<'h> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_hook(self, hook: &'h dyn EvalHook) -> Evaluator<'h> {
        Evaluator { hook: Some(hook) }
    }

    /// Evaluate `node` against `attributes`. Never fails; see [`evaluate`].
    #[must_use]
    pub fn evaluate(&self, node: &Node, attributes: &Attributes) -> Value {
        match node {
            Node::Operand(name) => {
                let resolved = resolve_operand(name, attributes);
                if let Some(hook) = self.hook {
                    hook.on_operand(name, &resolved);
                }
                resolved
            }
            Node::Operator { op, left, right } => {
                let left = self.evaluate(left, attributes);
                let right = self.evaluate(right, attributes);
                let result = apply(op, &left, &right);
                if let Some(hook) = self.hook {
                    hook.on_operator(op, &left, &right, &result);
                }
                result
            }
        }
    }
}

/// Evaluate `node` against `attributes`.
///
/// Operands resolve to the attribute of that name, else to an integer
/// literal, else to the raw text. Both children of an operator are always
/// evaluated. `AND`/`OR` combine the truthiness of their children;
/// comparisons between incompatible types, and operators outside the known
/// set, yield `false`.
///
/// # Example
///
/// ```
/// use rulekit::{create_rule, evaluate, Attributes, Value};
///
/// let rule = create_rule("age > 30").unwrap();
/// assert_eq!(evaluate(&rule, &Attributes::new().set("age", 35_i64)), Value::Bool(true));
/// assert_eq!(evaluate(&rule, &Attributes::new().set("age", 20_i64)), Value::Bool(false));
/// ```
#[must_use]
pub fn evaluate(node: &Node, attributes: &Attributes) -> Value {
    Evaluator::new().evaluate(node, attributes)
}

/// Decode a wire-form tree and evaluate it.
///
/// A tree that does not decode (unknown `node_type`, an operator missing a
/// child, a non-object) evaluates to `false` instead of failing. Decoding
/// has no nesting limit; parse deep JSON text with [`from_json_str`](crate::from_json_str).
#[must_use]
pub fn evaluate_json(ast: &serde_json::Value, attributes: &Attributes) -> Value {
    match Node::from_wire(ast) {
        Ok(node) => evaluate(&node, attributes),
        Err(err) => {
            warn!(error = %err, "undecodable rule tree evaluates to false");
            Value::Bool(false)
        }
    }
}

#[derive(Default)]
struct RecordingHook {
    steps: RefCell<Vec<EvaluationStep>>,
    operands: Cell<usize>,
}

impl EvalHook for RecordingHook {
    fn on_operand(&self, _name: &str, _resolved: &Value) {
        self.operands.set(self.operands.get() + 1);
    }

    fn on_operator(&self, op: &Op, left: &Value, right: &Value, result: &Value) {
        self.steps.borrow_mut().push(EvaluationStep {
            op: op.clone(),
            left: left.clone(),
            right: right.clone(),
            result: result.clone(),
        });
    }
}

/// Evaluate with a step-by-step [`EvaluationReport`].
pub fn evaluate_detailed(node: &Node, attributes: &Attributes) -> EvaluationReport {
    let recorder = RecordingHook::default();
    let start = Instant::now();
    let result = Evaluator::new()
        .with_hook(&recorder)
        .evaluate(node, attributes);
    let duration = start.elapsed();
    EvaluationReport::new(
        result,
        recorder.steps.into_inner(),
        recorder.operands.get(),
        duration,
    )
}

impl Node {
    /// Shorthand for [`evaluate`].
    #[must_use]
    pub fn evaluate(&self, attributes: &Attributes) -> Value {
        evaluate(self, attributes)
    }

    /// Whether the evaluated result is truthy.
    #[must_use]
    pub fn matches(&self, attributes: &Attributes) -> bool {
        evaluate(self, attributes).truthy()
    }
}

fn resolve_operand(name: &str, attributes: &Attributes) -> Value {
    if let Some(value) = attributes.get(name) {
        return value.clone();
    }
    integer_literal(name).unwrap_or_else(|| Value::String(name.to_owned()))
}

/// Read `text` as a decimal integer: surrounding whitespace, an optional sign
/// and single `_` separators between digits are allowed. Integers outside the
/// `i64` range become the nearest `f64`.
fn integer_literal(text: &str) -> Option<Value> {
    let text = text.trim();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let grouped_ok = digits.starts_with(|c: char| c.is_ascii_digit())
        && digits.ends_with(|c: char| c.is_ascii_digit())
        && !digits.contains("__")
        && digits.chars().all(|c| c.is_ascii_digit() || c == '_');
    if !grouped_ok {
        return None;
    }

    let mut cleaned: String = digits.chars().filter(|c| *c != '_').collect();
    if negative {
        cleaned.insert(0, '-');
    }
    match cleaned.parse::<i64>() {
        Ok(v) => Some(Value::Int(v)),
        Err(_) => {
            debug!(literal = text, "integer literal outside i64 range read as float");
            cleaned.parse::<f64>().ok().map(Value::Float)
        }
    }
}

fn apply(op: &Op, left: &Value, right: &Value) -> Value {
    let result = match op {
        Op::And => left.truthy() && right.truthy(),
        Op::Or => left.truthy() || right.truthy(),
        Op::Gt => ordered(op, left, right, Ordering::is_gt),
        Op::Gte => ordered(op, left, right, Ordering::is_ge),
        Op::Lt => ordered(op, left, right, Ordering::is_lt),
        Op::Lte => ordered(op, left, right, Ordering::is_le),
        Op::Eq => ordered(op, left, right, Ordering::is_eq),
        Op::TextEq => left.as_text() == right.as_text(),
        Op::Other(symbol) => {
            debug!(symbol = symbol.as_str(), "unrecognized operator evaluates to false");
            false
        }
    };
    Value::Bool(result)
}

fn ordered(op: &Op, left: &Value, right: &Value, accept: fn(Ordering) -> bool) -> bool {
    match left.partial_cmp_value(right) {
        Some(ord) => accept(ord),
        None => {
            debug!(
                op = %op,
                left = left.type_name(),
                right = right.type_name(),
                "incomparable operands evaluate to false"
            );
            false
        }
    }
}
