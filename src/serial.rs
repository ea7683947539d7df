//! The JSON boundary.
//!
//! Two rule-set shapes are accepted: a plain sequence of rules, and a map
//! keyed by field name whose rules may omit `fieldName`. Conditions arrive
//! in several historical spellings (`conditionType`/`compareValue`,
//! `conditions` item lists, `relatedFieldName` cross-field references) and
//! are normalized into the one canonical [`Condition`] tree here, so the
//! evaluator never sees wire-format variety.

use std::collections::BTreeMap;

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{
    CompareOp, Comparison, Condition, Operand, Record, ValidationResult, ValidationRule, Value,
};

/// Failure to parse or serialize a JSON payload at the boundary.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid rule set JSON: {0}")]
    Rules(#[source] serde_json::Error),
    #[error("invalid record JSON: {0}")]
    Record(#[source] serde_json::Error),
    #[error("failed to serialize validation result: {0}")]
    Result(#[source] serde_json::Error),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RuleSetForm {
    Sequence(Vec<ValidationRule>),
    ByField(BTreeMap<String, Vec<ValidationRule>>),
}

/// Parse a rule set from either accepted shape.
///
/// In the field-keyed shape, rules (and their children) that omit
/// `fieldName` inherit the enclosing key. The field-keyed shape flattens
/// in key order.
///
/// # Errors
///
/// Returns [`ParseError::Rules`] when the JSON matches neither shape.
pub fn rules_from_json(json: &str) -> Result<Vec<ValidationRule>, ParseError> {
    let form: RuleSetForm = serde_json::from_str(json).map_err(ParseError::Rules)?;
    Ok(match form {
        RuleSetForm::Sequence(rules) => rules,
        RuleSetForm::ByField(by_field) => {
            let mut rules = Vec::new();
            for (field, field_rules) in by_field {
                for mut rule in field_rules {
                    assign_field(&mut rule, &field);
                    rules.push(rule);
                }
            }
            rules
        }
    })
}

fn assign_field(rule: &mut ValidationRule, field: &str) {
    if rule.field_name.is_empty() {
        rule.field_name = field.to_owned();
    }
    for child in &mut rule.children {
        assign_field(child, field);
    }
}

/// Parse a record (field name to value map) from JSON.
///
/// # Errors
///
/// Returns [`ParseError::Record`] when the JSON is not an object.
pub fn record_from_json(json: &str) -> Result<Record, ParseError> {
    serde_json::from_str(json).map_err(ParseError::Record)
}

/// Serialize a validation result in the camelCase wire form.
///
/// # Errors
///
/// Returns [`ParseError::Result`] on serialization failure.
pub fn result_to_json(result: &ValidationResult) -> Result<String, ParseError> {
    serde_json::to_string(result).map_err(ParseError::Result)
}

#[derive(Serialize, Deserialize)]
enum LogicalOp {
    #[serde(rename = "AND", alias = "and", alias = "ALL", alias = "all")]
    And,
    #[serde(rename = "OR", alias = "or", alias = "ANY", alias = "any")]
    Or,
}

/// The wire shapes of a condition. Untagged: a node is either a logical
/// combination or a single comparison, told apart by its fields.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawCondition {
    Combination {
        #[serde(rename = "logicalOperator", alias = "logic")]
        logical_operator: LogicalOp,
        #[serde(rename = "items", alias = "conditions")]
        items: Vec<RawCondition>,
    },
    Single {
        #[serde(rename = "field", alias = "fieldName")]
        field: String,
        #[serde(rename = "operator", alias = "conditionType", alias = "op")]
        operator: CompareOp,
        #[serde(
            rename = "value",
            alias = "compareValue",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        value: Option<Value>,
        #[serde(
            rename = "relatedFieldName",
            alias = "relatedField",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        related_field_name: Option<String>,
    },
}

impl RawCondition {
    fn into_condition(self) -> Condition {
        match self {
            RawCondition::Combination {
                logical_operator,
                items,
            } => {
                let items = items.into_iter().map(RawCondition::into_condition).collect();
                match logical_operator {
                    LogicalOp::And => Condition::All(items),
                    LogicalOp::Or => Condition::Any(items),
                }
            }
            RawCondition::Single {
                field,
                operator,
                value,
                related_field_name,
            } => {
                // A cross-field reference wins over a literal when both
                // are present.
                let operand = match related_field_name {
                    Some(other) => Operand::Field(other),
                    None => Operand::Literal(value.unwrap_or(Value::Null)),
                };
                Condition::Single(Comparison {
                    field,
                    op: operator,
                    operand,
                })
            }
        }
    }
}

impl From<&Condition> for RawCondition {
    fn from(condition: &Condition) -> Self {
        match condition {
            Condition::Single(cmp) => {
                let (value, related_field_name) = match &cmp.operand {
                    Operand::Literal(value) => (Some(value.clone()), None),
                    Operand::Field(other) => (None, Some(other.clone())),
                };
                RawCondition::Single {
                    field: cmp.field.clone(),
                    operator: cmp.op,
                    value,
                    related_field_name,
                }
            }
            Condition::All(items) => RawCondition::Combination {
                logical_operator: LogicalOp::And,
                items: items.iter().map(RawCondition::from).collect(),
            },
            Condition::Any(items) => RawCondition::Combination {
                logical_operator: LogicalOp::Or,
                items: items.iter().map(RawCondition::from).collect(),
            },
        }
    }
}

impl Serialize for Condition {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        RawCondition::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Condition {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(RawCondition::deserialize(deserializer)?.into_condition())
    }
}
