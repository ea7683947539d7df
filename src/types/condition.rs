use std::fmt;

use serde::{Deserialize, Serialize};

use super::Value;

/// Comparison operators supported in rule conditions.
///
/// Wire names are `SCREAMING_SNAKE_CASE`; the aliases cover the spellings
/// older rule sets used (`equals`, `notEquals`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompareOp {
    #[serde(alias = "eq", alias = "equals")]
    Eq,
    #[serde(alias = "ne", alias = "notEquals")]
    Ne,
    #[serde(alias = "gt", alias = "greaterThan")]
    Gt,
    #[serde(alias = "lt", alias = "lessThan")]
    Lt,
    #[serde(alias = "gte", alias = "greaterThanOrEqual")]
    Gte,
    #[serde(alias = "lte", alias = "lessThanOrEqual")]
    Lte,
    #[serde(alias = "contains")]
    Contains,
    #[serde(alias = "startsWith")]
    StartsWith,
    #[serde(alias = "endsWith")]
    EndsWith,
    #[serde(alias = "in")]
    In,
    #[serde(alias = "notIn")]
    NotIn,
}

/// Right-hand side of a comparison: either a literal value or another
/// record field (cross-field comparison).
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Literal(Value),
    Field(String),
}

/// A single field comparison inside a condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub field: String,
    pub op: CompareOp,
    pub operand: Operand,
}

/// Boolean gate deciding whether a rule applies to a record.
///
/// One canonical tagged tree subsumes every shape the wire format accepts
/// (single comparison, AND/OR item lists, nested combinations); conversion
/// happens at the serial boundary, not here.
///
/// Policy: an empty `All` is vacuously true, an empty `Any` is vacuously
/// false.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// A single comparison.
    Single(Comparison),
    /// True iff every child condition is true.
    All(Vec<Condition>),
    /// True iff at least one child condition is true.
    Any(Vec<Condition>),
}

impl Condition {
    /// Combine with another condition under AND.
    #[must_use]
    pub fn and(self, other: Condition) -> Condition {
        Condition::All(vec![self, other])
    }

    /// Combine with another condition under OR.
    #[must_use]
    pub fn or(self, other: Condition) -> Condition {
        Condition::Any(vec![self, other])
    }
}

/// Intermediate builder for comparisons. Created by [`when()`]; requires a
/// comparison method to produce a [`Condition`].
#[derive(Debug, Clone)]
pub struct FieldCond {
    field: String,
}

macro_rules! comparison_method {
    ($name:ident, $op:expr) => {
        #[must_use]
        pub fn $name(self, value: impl Into<Value>) -> Condition {
            self.compare($op, Operand::Literal(value.into()))
        }
    };
}

impl FieldCond {
    fn compare(self, op: CompareOp, operand: Operand) -> Condition {
        Condition::Single(Comparison {
            field: self.field,
            op,
            operand,
        })
    }

    comparison_method!(eq, CompareOp::Eq);
    comparison_method!(ne, CompareOp::Ne);
    comparison_method!(gt, CompareOp::Gt);
    comparison_method!(lt, CompareOp::Lt);
    comparison_method!(gte, CompareOp::Gte);
    comparison_method!(lte, CompareOp::Lte);
    comparison_method!(contains, CompareOp::Contains);
    comparison_method!(starts_with, CompareOp::StartsWith);
    comparison_method!(ends_with, CompareOp::EndsWith);
    comparison_method!(is_in, CompareOp::In);
    comparison_method!(not_in, CompareOp::NotIn);

    /// Compare against another record field instead of a literal.
    #[must_use]
    pub fn eq_field(self, other: &str) -> Condition {
        self.compare(CompareOp::Eq, Operand::Field(other.to_owned()))
    }

    /// Ordered cross-field comparison.
    #[must_use]
    pub fn cmp_field(self, op: CompareOp, other: &str) -> Condition {
        self.compare(op, Operand::Field(other.to_owned()))
    }
}

/// Start building a condition on the named record field.
#[must_use]
pub fn when(field: &str) -> FieldCond {
    FieldCond {
        field: field.to_owned(),
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
            CompareOp::Contains => "contains",
            CompareOp::StartsWith => "starts_with",
            CompareOp::EndsWith => "ends_with",
            CompareOp::In => "in",
            CompareOp::NotIn => "not_in",
        };
        write!(f, "{symbol}")
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Literal(v) => write!(f, "{v}"),
            Operand::Field(name) => write!(f, "field({name})"),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Single(cmp) => write!(f, "({} {} {})", cmp.field, cmp.op, cmp.operand),
            Condition::All(items) => write_joined(f, items, " AND "),
            Condition::Any(items) => write_joined(f, items, " OR "),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[Condition], sep: &str) -> fmt::Result {
    write!(f, "(")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, "{sep}")?;
        }
        write!(f, "{item}")?;
    }
    write!(f, ")")
}
