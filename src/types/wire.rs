//! The four-field structural form an AST takes at the crate boundary.
//!
//! ```text
//! { "node_type": "operator" | "operand",
//!   "left":  <node> | <scalar> | null,
//!   "right": <node> | <scalar> | null,
//!   "value": <string> | <number> }
//! ```
//!
//! Encoding always writes all four fields. Decoding is looser: operand
//! children may be omitted, numeric values are kept as their text, and a
//! scalar in an operator's child slot becomes an operand leaf.

use serde::de::{self, DeserializeOwned};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value as Json};
use thiserror::Error;

use super::node::{Node, Op};

/// Errors raised while decoding a wire tree into a [`Node`].
#[derive(Debug, Error, PartialEq)]
pub enum WireError {
    #[error("expected a node object")]
    NotAnObject,

    #[error("missing field '{0}'")]
    MissingField(&'static str),

    #[error("field '{field}' must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    #[error("unrecognized node_type '{0}'")]
    UnknownNodeType(String),

    #[error("operator '{op}' is missing its {side} child")]
    MissingChild { op: String, side: &'static str },

    #[error("operand must not have a {side} child")]
    OperandWithChild { side: &'static str },
}

/// Parse JSON text without a fixed nesting limit.
///
/// `serde_json::from_str` stops at 128 levels, which a left-deep combination
/// of a few hundred rules already exceeds. Here the recursion limit is
/// disabled and the stack grows on the heap while nested input is read.
///
/// # Errors
///
/// Returns the `serde_json` error for malformed JSON, trailing characters, or
/// a document that does not fit `T`.
///
/// # Example
///
/// ```
/// use rulekit::{combine, from_json_str, Node};
///
/// let texts: Vec<String> = (0..300).map(|i| format!("f{i} >= 1")).collect();
/// let node = combine(&texts).unwrap().unwrap();
/// let decoded: Node = from_json_str(&serde_json::to_string(&node).unwrap()).unwrap();
/// assert_eq!(decoded, node);
/// ```
pub fn from_json_str<T: DeserializeOwned>(text: &str) -> Result<T, serde_json::Error> {
    let mut de = serde_json::Deserializer::from_str(text);
    de.disable_recursion_limit();
    let value = T::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(value)
}

/// Text of a scalar JSON value; `None` for null, arrays and objects.
fn scalar_text(value: &Json) -> Option<String> {
    match value {
        Json::String(s) => Some(s.clone()),
        Json::Number(n) => Some(n.to_string()),
        Json::Bool(b) => Some(b.to_string()),
        Json::Null | Json::Array(_) | Json::Object(_) => None,
    }
}

/// A `left` / `right` slot. Absent and `null` are both empty.
fn child(fields: &Map<String, Json>, side: &'static str) -> Result<Option<Node>, WireError> {
    match fields.get(side) {
        None | Some(Json::Null) => Ok(None),
        Some(nested @ Json::Object(_)) => Node::from_wire(nested).map(Some),
        Some(scalar) => scalar_text(scalar)
            .map(|text| Some(Node::Operand(text)))
            .ok_or(WireError::InvalidField {
                field: side,
                expected: "a node or a scalar",
            }),
    }
}

impl Node {
    /// Decode a tree from its four-field JSON form.
    ///
    /// Operand children may be omitted, numeric values are kept as their
    /// text, and a scalar in an operator's child slot becomes an operand.
    /// Unknown fields are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`WireError`] for a non-object, a missing or mistyped
    /// `node_type` / `value`, an unknown `node_type`, an operator without
    /// both children, or an operand with a child.
    pub fn from_wire(wire: &Json) -> Result<Node, WireError> {
        let Json::Object(fields) = wire else {
            return Err(WireError::NotAnObject);
        };
        let node_type = match fields.get("node_type") {
            None => return Err(WireError::MissingField("node_type")),
            Some(Json::String(s)) => s.as_str(),
            Some(_) => {
                return Err(WireError::InvalidField {
                    field: "node_type",
                    expected: "a string",
                })
            }
        };
        let value = fields
            .get("value")
            .ok_or(WireError::MissingField("value"))
            .and_then(|v| {
                scalar_text(v).ok_or(WireError::InvalidField {
                    field: "value",
                    expected: "a scalar",
                })
            })?;

        match node_type {
            "operand" => {
                if child(fields, "left")?.is_some() {
                    return Err(WireError::OperandWithChild { side: "left" });
                }
                if child(fields, "right")?.is_some() {
                    return Err(WireError::OperandWithChild { side: "right" });
                }
                Ok(Node::Operand(value))
            }
            "operator" => {
                let Some(left) = child(fields, "left")? else {
                    return Err(WireError::MissingChild {
                        op: value,
                        side: "left",
                    });
                };
                let Some(right) = child(fields, "right")? else {
                    return Err(WireError::MissingChild {
                        op: value,
                        side: "right",
                    });
                };
                let op = Op::from_symbol(&value).unwrap_or(Op::Other(value));
                Ok(Node::operator(op, left, right))
            }
            other => Err(WireError::UnknownNodeType(other.to_owned())),
        }
    }
}

/// Reads any self-describing format through [`serde_json::Value`]. Note that
/// `serde_json::from_str` applies its own 128-level limit before this impl
/// runs; use [`from_json_str`] for deep trees.
impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = Json::deserialize(serde_stacker::Deserializer::new(deserializer))?;
        Node::from_wire(&wire).map_err(de::Error::custom)
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Node", 4)?;
        match self {
            Node::Operator { op, left, right } => {
                state.serialize_field("node_type", "operator")?;
                state.serialize_field("left", left.as_ref())?;
                state.serialize_field("right", right.as_ref())?;
                state.serialize_field("value", op.symbol())?;
            }
            Node::Operand(value) => {
                state.serialize_field("node_type", "operand")?;
                state.serialize_field("left", &None::<Node>)?;
                state.serialize_field("right", &None::<Node>)?;
                state.serialize_field("value", value)?;
            }
        }
        state.end()
    }
}
