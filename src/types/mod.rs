mod attributes;
mod error;
mod evaluation_report;
mod node;
mod value;
mod wire;

pub use attributes::Attributes;
pub use error::{CombineError, ValidationError};
pub use evaluation_report::{EvaluationReport, EvaluationStep};
pub use node::{attr, AttrExpr, Node, Op};
pub use value::Value;
pub use wire::{from_json_str, WireError};
