use proptest::prelude::*;
use rulekit::{Attributes, Node, Op};

// --- Fixed attribute schema ---
// age        : i64 (0..=100)
// salary     : i64 (0..=200_000)
// experience : i64 (0..=40)
// department : string, one of DEPARTMENTS

pub const NAMES: &[&str] = &["age", "salary", "experience", "department"];
pub const DEPARTMENTS: &[&str] = &["Sales", "HR", "Marketing", "Engineering"];

const COMPARISONS: &[Op] = &[Op::Gt, Op::Gte, Op::Lt, Op::Lte, Op::Eq, Op::TextEq];

/// Generate an attribute map that aligns with the fixed schema.
pub fn arb_attributes() -> impl Strategy<Value = Attributes> {
    (
        0_i64..=100,
        0_i64..=200_000,
        0_i64..=40,
        prop::sample::select(DEPARTMENTS),
    )
        .prop_map(|(age, salary, experience, department)| {
            Attributes::new()
                .set("age", age)
                .set("salary", salary)
                .set("experience", experience)
                .set("department", department)
        })
}

/// Generate one `name <op> literal` condition.
pub fn arb_condition() -> impl Strategy<Value = Node> {
    let literal = prop_oneof![
        (0_i64..=200_000).prop_map(|n| n.to_string()),
        prop::sample::select(DEPARTMENTS).prop_map(str::to_owned),
    ];
    (
        prop::sample::select(NAMES),
        prop::sample::select(COMPARISONS),
        literal,
    )
        .prop_map(|(name, op, literal)| {
            Node::operator(op, Node::operand(name), Node::operand(literal))
        })
}

/// Generate a tree of conditions joined by AND / OR.
pub fn arb_node() -> impl Strategy<Value = Node> {
    arb_condition().prop_recursive(4, 16, 2, |inner| {
        (inner.clone(), any::<bool>(), inner).prop_map(|(left, is_and, right)| {
            if is_and {
                left.and(right)
            } else {
                left.or(right)
            }
        })
    })
}

/// Render a generated tree back to rule text that parses to the same tree.
///
/// Logical children are always parenthesized; non-numeric literals are quoted.
pub fn render(node: &Node) -> String {
    match node {
        Node::Operand(value) => value.clone(),
        Node::Operator { op, left, right } if op.is_logical() => {
            format!("({}) {op} ({})", render(left), render(right))
        }
        Node::Operator { op, left, right } => {
            let literal = render(right);
            if literal.parse::<i64>().is_ok() {
                format!("{} {op} {literal}", render(left))
            } else {
                format!("{} {op} '{literal}'", render(left))
            }
        }
    }
}
