//! Condition evaluation: decides whether a rule applies to a record.

use std::cmp::Ordering;

use tracing::debug;

use crate::types::{CompareOp, Comparison, Condition, Operand, Record, Value};

/// True when the rule guarded by `condition` applies to `record`.
/// A rule with no condition is unconditionally applicable.
pub(crate) fn is_satisfied(condition: Option<&Condition>, record: &Record) -> bool {
    condition.is_none_or(|cond| eval(cond, record))
}

fn eval(condition: &Condition, record: &Record) -> bool {
    match condition {
        Condition::Single(cmp) => eval_comparison(cmp, record),
        // Vacuous truth: empty All is true, empty Any is false.
        Condition::All(items) => items.iter().all(|c| eval(c, record)),
        Condition::Any(items) => items.iter().any(|c| eval(c, record)),
    }
}

fn eval_comparison(cmp: &Comparison, record: &Record) -> bool {
    let field_value = record.get_present(&cmp.field);
    let operand_value: Option<Value> = match &cmp.operand {
        Operand::Literal(Value::Null) => None,
        Operand::Literal(v) => Some(v.clone()),
        Operand::Field(name) => record.get_present(name).cloned(),
    };

    // Null policy: both sides absent/null satisfies only EQ; exactly one
    // side null satisfies only NE.
    let (field_value, operand_value) = match (field_value, operand_value) {
        (None, None) => return cmp.op == CompareOp::Eq,
        (None, Some(_)) | (Some(_), None) => return cmp.op == CompareOp::Ne,
        (Some(f), Some(o)) => (f, o),
    };

    // Bring the operand to the record value's kind before comparing. The
    // containment family keeps the operand as-is: its right-hand side is a
    // needle or a collection, not a same-typed scalar.
    let operand_value = match cmp.op {
        CompareOp::Contains
        | CompareOp::StartsWith
        | CompareOp::EndsWith
        | CompareOp::In
        | CompareOp::NotIn => operand_value,
        _ if operand_value.kind() != field_value.kind() => {
            match operand_value.coerce(field_value.kind()) {
                Ok(coerced) => coerced,
                Err(err) => {
                    debug!(field = %cmp.field, %err, "operand coercion failed, comparison is false");
                    return false;
                }
            }
        }
        _ => operand_value,
    };

    let ord = || field_value.partial_cmp_value(&operand_value);
    match cmp.op {
        CompareOp::Eq => field_value.equals(&operand_value),
        CompareOp::Ne => !field_value.equals(&operand_value),
        CompareOp::Gt => ord() == Some(Ordering::Greater),
        CompareOp::Lt => ord() == Some(Ordering::Less),
        CompareOp::Gte => matches!(ord(), Some(Ordering::Greater | Ordering::Equal)),
        CompareOp::Lte => matches!(ord(), Some(Ordering::Less | Ordering::Equal)),
        CompareOp::Contains => field_value.contains(&operand_value),
        CompareOp::StartsWith => field_value.starts_with(&operand_value),
        CompareOp::EndsWith => field_value.ends_with(&operand_value),
        CompareOp::In => field_value.is_in(&operand_value),
        CompareOp::NotIn => !field_value.is_in(&operand_value),
    }
}
