use std::fmt;

/// Operator symbols that may label an [`Node::Operator`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Op {
    And,
    Or,
    Gt,
    Gte,
    Lt,
    Lte,
    /// `==`: equality on the native evaluated values.
    Eq,
    /// `=`: equality on the textual form of both sides.
    TextEq,
    /// A symbol outside the known set. Only produced when decoding a wire
    /// tree; always evaluates to `false`.
    Other(String),
}

impl Op {
    /// Look up a known operator symbol.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Op> {
        Some(match symbol {
            "AND" => Op::And,
            "OR" => Op::Or,
            ">" => Op::Gt,
            ">=" => Op::Gte,
            "<" => Op::Lt,
            "<=" => Op::Lte,
            "==" => Op::Eq,
            "=" => Op::TextEq,
            _ => return None,
        })
    }

    /// Comparison operators accepted after an attribute name.
    #[must_use]
    pub fn comparison_from_symbol(symbol: &str) -> Option<Op> {
        Op::from_symbol(symbol).filter(Op::is_comparison)
    }

    #[must_use]
    pub fn symbol(&self) -> &str {
        match self {
            Op::And => "AND",
            Op::Or => "OR",
            Op::Gt => ">",
            Op::Gte => ">=",
            Op::Lt => "<",
            Op::Lte => "<=",
            Op::Eq => "==",
            Op::TextEq => "=",
            Op::Other(s) => s,
        }
    }

    #[must_use]
    pub fn is_logical(&self) -> bool {
        matches!(self, Op::And | Op::Or)
    }

    #[must_use]
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            Op::Gt | Op::Gte | Op::Lt | Op::Lte | Op::Eq | Op::TextEq
        )
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A rule AST node.
///
/// The tree is strictly binary: an operator always owns both children and an
/// operand never has any. Nodes expose no mutating API, so a built tree can be
/// shared freely across threads and evaluated concurrently.
///
/// Evaluation, encoding, comparison and drop recurse once per level of
/// [`depth()`](Node::depth). Parsed text is bounded by
/// [`ParseOptions::max_nesting()`](crate::ParseOptions::max_nesting), but
/// [`combine`](crate::combine) builds a left-deep chain one level per rule.
/// A few hundred levels fit comfortably in a default 2 MiB thread stack;
/// far deeper trees should be handled on a thread with a larger stack.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Operator {
        op: Op,
        left: Box<Node>,
        right: Box<Node>,
    },
    /// An attribute name or a literal. Quoted literals are stored unquoted.
    Operand(String),
}

impl Node {
    #[must_use]
    pub fn operator(op: Op, left: Node, right: Node) -> Node {
        Node::Operator {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    #[must_use]
    pub fn operand(value: impl Into<String>) -> Node {
        Node::Operand(value.into())
    }

    #[must_use]
    pub fn and(self, other: Node) -> Node {
        Node::operator(Op::And, self, other)
    }

    #[must_use]
    pub fn or(self, other: Node) -> Node {
        Node::operator(Op::Or, self, other)
    }

    /// Number of edges on the longest root-to-leaf path.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Node::Operand(_) => 0,
            Node::Operator { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    /// Total number of nodes in the tree.
    #[must_use]
    pub fn node_count(&self) -> usize {
        match self {
            Node::Operand(_) => 1,
            Node::Operator { left, right, .. } => 1 + left.node_count() + right.node_count(),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Operator { op, left, right } => write!(f, "({left} {op} {right})"),
            Node::Operand(value) => write!(f, "{value}"),
        }
    }
}

/// Intermediate builder for a single `attribute <op> literal` condition.
/// Created by [`attr()`].
#[derive(Debug, Clone)]
pub struct AttrExpr {
    name: String,
}

impl AttrExpr {
    fn compare(self, op: Op, literal: impl ToString) -> Node {
        Node::operator(op, Node::Operand(self.name), Node::Operand(literal.to_string()))
    }

    #[must_use]
    pub fn gt(self, literal: impl ToString) -> Node {
        self.compare(Op::Gt, literal)
    }

    #[must_use]
    pub fn gte(self, literal: impl ToString) -> Node {
        self.compare(Op::Gte, literal)
    }

    #[must_use]
    pub fn lt(self, literal: impl ToString) -> Node {
        self.compare(Op::Lt, literal)
    }

    #[must_use]
    pub fn lte(self, literal: impl ToString) -> Node {
        self.compare(Op::Lte, literal)
    }

    #[must_use]
    pub fn eq(self, literal: impl ToString) -> Node {
        self.compare(Op::Eq, literal)
    }

    /// `name = literal`, compared as text.
    #[must_use]
    pub fn text_eq(self, literal: impl ToString) -> Node {
        self.compare(Op::TextEq, literal)
    }
}

#[must_use]
pub fn attr(name: &str) -> AttrExpr {
    AttrExpr {
        name: name.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attr_gt_builds_comparison() {
        let node = attr("age").gt(30);
        assert_eq!(
            node,
            Node::Operator {
                op: Op::Gt,
                left: Box::new(Node::Operand("age".to_owned())),
                right: Box::new(Node::Operand("30".to_owned())),
            }
        );
    }

    #[test]
    fn all_comparison_builders() {
        let cases = vec![
            (attr("f").gt(1), Op::Gt),
            (attr("f").gte(1), Op::Gte),
            (attr("f").lt(1), Op::Lt),
            (attr("f").lte(1), Op::Lte),
            (attr("f").eq(1), Op::Eq),
            (attr("f").text_eq("x"), Op::TextEq),
        ];
        for (node, expected) in cases {
            match node {
                Node::Operator { op, .. } => assert_eq!(op, expected),
                other => panic!("expected Operator, got {other:?}"),
            }
        }
    }

    #[test]
    fn and_chaining_is_left_associative() {
        let node = attr("a").gt(1).and(attr("b").gt(2)).and(attr("c").gt(3));
        match &node {
            Node::Operator { op, left, right } => {
                assert_eq!(*op, Op::And);
                assert_eq!(**right, attr("c").gt(3));
                assert!(matches!(left.as_ref(), Node::Operator { op: Op::And, .. }));
            }
            other => panic!("expected outer And, got {other:?}"),
        }
    }

    #[test]
    fn symbols_round_trip() {
        for sym in ["AND", "OR", ">", ">=", "<", "<=", "==", "="] {
            let op = Op::from_symbol(sym).unwrap();
            assert_eq!(op.symbol(), sym);
        }
        assert_eq!(Op::from_symbol("!="), None);
        assert_eq!(Op::Other("!=".into()).symbol(), "!=");
    }

    #[test]
    fn comparison_lookup_excludes_logical() {
        assert_eq!(Op::comparison_from_symbol(">="), Some(Op::Gte));
        assert_eq!(Op::comparison_from_symbol("AND"), None);
        assert!(Op::Or.is_logical());
        assert!(!Op::Other("~".into()).is_comparison());
    }

    #[test]
    fn display() {
        let node = attr("age").gt(30).or(attr("dept").text_eq("Sales"));
        assert_eq!(node.to_string(), "((age > 30) OR (dept = Sales))");
    }

    #[test]
    fn depth_and_node_count() {
        let leaf = Node::operand("x");
        assert_eq!(leaf.depth(), 0);
        assert_eq!(leaf.node_count(), 1);
        let node = attr("a").gt(1).and(attr("b").lt(2));
        assert_eq!(node.depth(), 2);
        assert_eq!(node.node_count(), 7);
    }
}
