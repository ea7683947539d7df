//! The rule evaluator: orders rules, gates them on conditions, dispatches
//! to the validator registry, recurses into children, and aggregates
//! every violation into one result.

use tracing::{debug, warn};

use crate::condition;
use crate::locale::{Locale, MessageCatalog};
use crate::serial::{self, ParseError};
use crate::types::{
    codes, Params, Record, ValidationError, ValidationResult, ValidationRule, Value,
};
use crate::validators::{Validator, ValidatorRegistry};

/// The validation engine.
///
/// Holds the validator registry and the message catalog, both built once
/// and read-only afterwards, so one engine can serve many concurrent
/// evaluations. Each call takes a caller-owned rule set and record and
/// returns a fresh [`ValidationResult`]; no state is retained between
/// calls.
pub struct Engine {
    registry: ValidatorRegistry,
    catalog: MessageCatalog,
}

impl Engine {
    /// An engine with the built-in validators and message catalog.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: ValidatorRegistry::with_builtins(),
            catalog: MessageCatalog::with_builtin_messages(),
        }
    }

    /// An engine from explicit parts, for callers that bring their own
    /// validators or messages.
    #[must_use]
    pub fn with_parts(registry: ValidatorRegistry, catalog: MessageCatalog) -> Self {
        Self { registry, catalog }
    }

    /// Register an additional validator. Registration must finish before
    /// the engine is shared across threads.
    pub fn register(&mut self, validator: Box<dyn Validator>) {
        self.registry.register(validator);
    }

    #[must_use]
    pub fn registry(&self) -> &ValidatorRegistry {
        &self.registry
    }

    /// Mutable access to the message catalog, for adding templates during
    /// setup.
    pub fn catalog_mut(&mut self) -> &mut MessageCatalog {
        &mut self.catalog
    }

    /// Evaluate a rule set against a record.
    ///
    /// Disabled rules are dropped, the rest run in `order` (unordered
    /// rules after all ordered ones, input order preserved among ties),
    /// and evaluation is exhaustive: every applicable rule runs and every
    /// violation is reported in discovery order.
    pub fn evaluate(&self, rules: &[ValidationRule], record: &Record) -> ValidationResult {
        let mut applicable: Vec<&ValidationRule> = rules.iter().filter(|r| r.enabled).collect();
        applicable.sort_by_key(|r| (r.order.is_none(), r.order));

        let mut result = ValidationResult::success();
        for rule in applicable {
            if !condition::is_satisfied(rule.condition.as_ref(), record) {
                debug!(
                    field = %rule.field_name,
                    validator_type = %rule.validator_type,
                    "rule skipped, condition not met"
                );
                continue;
            }
            result.merge(self.evaluate_rule(rule, record));
        }
        result
    }

    /// [`evaluate`](Self::evaluate), then resolve every error's message
    /// key against the catalog for the requested locale.
    pub fn evaluate_localized(
        &self,
        rules: &[ValidationRule],
        record: &Record,
        locale: &Locale,
    ) -> ValidationResult {
        let mut result = self.evaluate(rules, record);
        self.localize_errors(&mut result, locale);
        result
    }

    /// Convenience entry point for callers holding raw JSON: parses the
    /// rule set (either wire form) and the record, then evaluates with
    /// the given locale (default locale when `None`).
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] when the rule set or record JSON is
    /// malformed. Evaluation itself never fails.
    pub fn validate_json(
        &self,
        rules_json: &str,
        record_json: &str,
        locale: Option<&str>,
    ) -> Result<ValidationResult, ParseError> {
        let rules = serial::rules_from_json(rules_json)?;
        let record = serial::record_from_json(record_json)?;
        let locale = locale.map(Locale::parse).unwrap_or_default();
        Ok(self.evaluate_localized(&rules, &record, &locale))
    }

    fn evaluate_rule(&self, rule: &ValidationRule, record: &Record) -> ValidationResult {
        let Some(validator) = self.registry.lookup(&rule.validator_type) else {
            warn!(validator_type = %rule.validator_type, "validator not found");
            let mut params = Params::new();
            params.insert(
                "validatorType".to_owned(),
                Value::from(rule.validator_type.clone()),
            );
            return ValidationResult::failure(
                ValidationError::new(
                    &rule.field_name,
                    codes::VALIDATOR_NOT_FOUND,
                    format!("Unknown validator type: {}", rule.validator_type),
                )
                .with_key("validation.validator.not.found")
                .with_params(params)
                .with_validator(&rule.validator_type),
            );
        };

        let mut result = validator.validate(
            &rule.field_name,
            record.get(&rule.field_name),
            &rule.params,
            record,
        );

        // Rule-level message/key always win over the validator's defaults.
        if !result.is_valid() {
            for error in result.errors_mut() {
                if let Some(message) = &rule.error_message {
                    error.error_message.clone_from(message);
                }
                if let Some(key) = &rule.error_message_key {
                    error.error_message_key = Some(key.clone());
                }
            }
        }

        // Children share the parent's exposure: they are only reached
        // because the parent's condition held.
        if !rule.children.is_empty() {
            result.merge(self.evaluate(&rule.children, record));
        }
        result
    }

    fn localize_errors(&self, result: &mut ValidationResult, locale: &Locale) {
        for error in result.errors_mut() {
            let Some(key) = error.error_message_key.clone() else {
                continue;
            };
            match self.catalog.localize(
                &key,
                error.error_message_params.as_ref(),
                error.field_name.as_deref(),
                locale,
            ) {
                Some(message) => error.error_message = message,
                None => {
                    warn!(%key, %locale, "no template for message key");
                    if error.error_message.is_empty() {
                        error.error_message = key;
                    }
                }
            }
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::condition::when;

    fn field_codes(result: &ValidationResult) -> Vec<(String, String)> {
        result
            .errors()
            .iter()
            .map(|e| {
                (
                    e.field_name.clone().unwrap_or_default(),
                    e.error_code.clone(),
                )
            })
            .collect()
    }

    #[test]
    fn empty_rule_set_is_valid() {
        let engine = Engine::new();
        assert!(engine.evaluate(&[], &Record::new()).is_valid());
    }

    #[test]
    fn disabled_rules_never_run() {
        let engine = Engine::new();
        let rules = [ValidationRule::new("username", "required").enabled(false)];
        assert!(engine.evaluate(&rules, &Record::new()).is_valid());
    }

    #[test]
    fn ordered_rules_run_before_unordered() {
        let engine = Engine::new();
        let rules = [
            ValidationRule::new("late", "required"),
            ValidationRule::new("second", "required").order(2),
            ValidationRule::new("first", "required").order(1),
        ];
        let result = engine.evaluate(&rules, &Record::new());
        let fields: Vec<_> = field_codes(&result).into_iter().map(|(f, _)| f).collect();
        assert_eq!(fields, ["first", "second", "late"]);
    }

    #[test]
    fn equal_orders_preserve_input_order() {
        let engine = Engine::new();
        let rules = [
            ValidationRule::new("a", "required").order(1),
            ValidationRule::new("b", "required").order(1),
            ValidationRule::new("c", "required").order(1),
        ];
        let result = engine.evaluate(&rules, &Record::new());
        let fields: Vec<_> = field_codes(&result).into_iter().map(|(f, _)| f).collect();
        assert_eq!(fields, ["a", "b", "c"]);
    }

    #[test]
    fn unknown_validator_reports_and_continues() {
        let engine = Engine::new();
        let rules = [
            ValidationRule::new("a", "noSuchValidator"),
            ValidationRule::new("b", "required"),
        ];
        let result = engine.evaluate(&rules, &Record::new());
        assert_eq!(
            field_codes(&result),
            [
                ("a".to_owned(), codes::VALIDATOR_NOT_FOUND.to_owned()),
                ("b".to_owned(), codes::FIELD_REQUIRED.to_owned()),
            ]
        );
    }

    #[test]
    fn rule_message_overrides_validator_default() {
        let engine = Engine::new();
        let rules = [ValidationRule::new("username", "required")
            .message("please pick a username")
            .message_key("username.required")];
        let result = engine.evaluate(&rules, &Record::new());
        let err = &result.errors()[0];
        assert_eq!(err.error_message, "please pick a username");
        assert_eq!(err.error_message_key.as_deref(), Some("username.required"));
        // The stable code is untouched by the override.
        assert_eq!(err.error_code, codes::FIELD_REQUIRED);
    }

    #[test]
    fn children_run_after_parent_and_merge() {
        let engine = Engine::new();
        let rules = [ValidationRule::new("address", "required")
            .child(ValidationRule::new("city", "required"))
            .child(ValidationRule::new("zip", "required"))];
        let result = engine.evaluate(&rules, &Record::new());
        let fields: Vec<_> = field_codes(&result).into_iter().map(|(f, _)| f).collect();
        assert_eq!(fields, ["address", "city", "zip"]);
    }

    #[test]
    fn false_condition_skips_children_too() {
        let engine = Engine::new();
        let rules = [ValidationRule::new("license", "required")
            .condition(when("age").gte(18_i64))
            .child(ValidationRule::new("licenseNumber", "required"))];
        let record = Record::new().set("age", 16_i64);
        assert!(engine.evaluate(&rules, &record).is_valid());
    }

    #[test]
    fn children_skipped_when_parent_validator_unknown() {
        let engine = Engine::new();
        let rules = [ValidationRule::new("a", "noSuchValidator")
            .child(ValidationRule::new("b", "required"))];
        let result = engine.evaluate(&rules, &Record::new());
        assert_eq!(result.errors().len(), 1);
        assert_eq!(result.errors()[0].error_code, codes::VALIDATOR_NOT_FOUND);
    }

    #[test]
    fn localization_resolves_key() {
        let engine = Engine::new();
        let rules = [ValidationRule::new("username", "required")];
        let result =
            engine.evaluate_localized(&rules, &Record::new(), &Locale::parse("zh_CN"));
        assert_eq!(result.errors()[0].error_message, "字段'username'不能为空");
    }

    #[test]
    fn localization_missing_key_keeps_existing_message() {
        let engine = Engine::new();
        let rules = [ValidationRule::new("username", "required").message_key("no.such.key")];
        let result = engine.evaluate_localized(&rules, &Record::new(), &Locale::default());
        assert_eq!(result.errors()[0].error_message, "Field 'username' is required");
    }

    #[test]
    fn repeated_evaluation_is_deterministic() {
        let engine = Engine::new();
        let rules = [
            ValidationRule::new("username", "required"),
            ValidationRule::new("email", "email"),
        ];
        let record = Record::new().set("email", "not-an-email");
        let first = engine.evaluate(&rules, &record);
        for _ in 0..3 {
            assert_eq!(engine.evaluate(&rules, &record), first);
        }
    }
}
