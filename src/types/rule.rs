use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Condition, Value};

/// Validator-specific parameters, e.g. `{"minLength": 6}`.
pub type Params = BTreeMap<String, Value>;

/// One validation obligation: which field, which validator, and when it
/// applies.
///
/// Rules nest through `children`; a child is only reached when its parent's
/// condition held and the parent was evaluated. The wire format is
/// `camelCase` (see the crate-level serial module for the two accepted
/// rule-set shapes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRule {
    /// Field this rule checks. Filled from the enclosing key when the rule
    /// set arrives in field-keyed form.
    #[serde(default)]
    pub field_name: String,

    /// Registry tag of the validator to run.
    pub validator_type: String,

    /// Validator parameters.
    #[serde(default, alias = "validatorParams")]
    pub params: Params,

    /// Gate deciding whether this rule (and its children) applies.
    #[serde(default)]
    pub condition: Option<Condition>,

    /// Child rules evaluated after this rule, against the same record.
    #[serde(default)]
    pub children: Vec<ValidationRule>,

    /// Explicit position in the evaluation order; unordered rules run after
    /// all ordered ones.
    #[serde(default)]
    pub order: Option<i32>,

    /// Disabled rules never contribute errors.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Overrides the validator's default error message on failure.
    #[serde(default)]
    pub error_message: Option<String>,

    /// Overrides the validator's default localization key on failure.
    #[serde(default)]
    pub error_message_key: Option<String>,
}

fn default_enabled() -> bool {
    true
}

impl ValidationRule {
    /// Create an enabled rule with no condition, params, or children.
    #[must_use]
    pub fn new(field_name: &str, validator_type: &str) -> Self {
        Self {
            field_name: field_name.to_owned(),
            validator_type: validator_type.to_owned(),
            params: Params::new(),
            condition: None,
            children: Vec::new(),
            order: None,
            enabled: true,
            error_message: None,
            error_message_key: None,
        }
    }

    /// Add one validator parameter.
    #[must_use]
    pub fn param(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_owned(), value.into());
        self
    }

    /// Gate this rule on a condition.
    #[must_use]
    pub fn condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Append a child rule.
    #[must_use]
    pub fn child(mut self, child: ValidationRule) -> Self {
        self.children.push(child);
        self
    }

    /// Set the explicit evaluation order.
    #[must_use]
    pub fn order(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }

    /// Enable or disable the rule.
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the rule-level error message override.
    #[must_use]
    pub fn message(mut self, message: &str) -> Self {
        self.error_message = Some(message.to_owned());
        self
    }

    /// Set the rule-level localization key override.
    #[must_use]
    pub fn message_key(mut self, key: &str) -> Self {
        self.error_message_key = Some(key.to_owned());
        self
    }
}
