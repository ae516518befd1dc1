use std::fmt;
use std::time::Duration;

use super::node::Op;
use super::value::Value;

/// One operator application recorded during a detailed evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationStep {
    pub op: Op,
    pub left: Value,
    pub right: Value,
    pub result: Value,
}

impl fmt::Display for EvaluationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} => {}",
            self.left, self.op, self.right, self.result
        )
    }
}

/// Detailed evaluation report returned by
/// [`evaluate_detailed()`](crate::evaluate_detailed).
///
/// Contains the result, every operator step in the order it completed
/// (post-order), how many operands were resolved, and the wall-clock duration.
#[derive(Debug, Clone)]
#[must_use]
pub struct EvaluationReport {
    result: Value,
    steps: Vec<EvaluationStep>,
    operands_resolved: usize,
    duration: Duration,
}

impl EvaluationReport {
    pub(crate) fn new(
        result: Value,
        steps: Vec<EvaluationStep>,
        operands_resolved: usize,
        duration: Duration,
    ) -> Self {
        Self {
            result,
            steps,
            operands_resolved,
            duration,
        }
    }

    /// The evaluation result, same as [`evaluate()`](crate::evaluate).
    #[must_use]
    pub fn result(&self) -> &Value {
        &self.result
    }

    /// Operator applications in completion order; the root is last.
    #[must_use]
    pub fn steps(&self) -> &[EvaluationStep] {
        &self.steps
    }

    /// Number of operand leaves resolved.
    #[must_use]
    pub fn operands_resolved(&self) -> usize {
        self.operands_resolved
    }

    /// Wall-clock duration of the evaluation.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "result: {}", self.result)?;
        let steps: Vec<String> = self.steps.iter().map(ToString::to_string).collect();
        write!(f, ", steps: [{}]", steps.join(", "))?;
        write!(f, ", duration: {:?}", self.duration)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step() -> EvaluationStep {
        EvaluationStep {
            op: Op::Gt,
            left: Value::Int(35),
            right: Value::Int(30),
            result: Value::Bool(true),
        }
    }

    #[test]
    fn report_accessors() {
        let report = EvaluationReport::new(
            Value::Bool(true),
            vec![step()],
            2,
            Duration::from_nanos(500),
        );

        assert_eq!(report.result(), &Value::Bool(true));
        assert_eq!(report.steps(), &[step()]);
        assert_eq!(report.operands_resolved(), 2);
        assert_eq!(report.duration(), Duration::from_nanos(500));
    }

    #[test]
    fn report_display() {
        let report = EvaluationReport::new(
            Value::Bool(true),
            vec![step()],
            2,
            Duration::from_nanos(500),
        );
        let s = report.to_string();
        assert!(s.contains("result: true"));
        assert!(s.contains("steps: [35 > 30 => true]"));
    }

    #[test]
    fn report_display_no_steps() {
        let report = EvaluationReport::new(
            Value::String("age".into()),
            vec![],
            1,
            Duration::from_nanos(100),
        );
        assert!(report.to_string().contains("steps: []"));
    }
}
