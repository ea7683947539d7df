use regex::Regex;

use super::{is_absent, str_param, Validator};
use crate::types::{codes, Params, Record, ValidationError, ValidationResult, Value};

/// Fails when a string does not fully match the `regex` parameter.
///
/// The pattern is compiled per call (rule params are caller data, not
/// trusted configuration); a pattern that fails to compile is reported as
/// a validation error, never a panic.
pub struct RegexValidator;

impl Validator for RegexValidator {
    fn validator_type(&self) -> &'static str {
        "regex"
    }

    fn validate(
        &self,
        field_name: &str,
        value: Option<&Value>,
        params: &Params,
        _record: &Record,
    ) -> ValidationResult {
        if is_absent(value) {
            return ValidationResult::success();
        }
        let Some(text) = value.and_then(Value::as_str) else {
            return ValidationResult::failure(
                ValidationError::new(
                    field_name,
                    codes::REGEX_INVALID_TYPE,
                    format!("Field '{field_name}' must be a string"),
                )
                .with_key("validation.regex.invalid.type")
                .with_validator(self.validator_type()),
            );
        };
        let Some(pattern) = str_param(params, "regex") else {
            return ValidationResult::failure(
                ValidationError::new(
                    field_name,
                    codes::REGEX_PARAM_REQUIRED,
                    "Regex parameter is required",
                )
                .with_key("validation.regex.param.required")
                .with_validator(self.validator_type()),
            );
        };
        // Anchor so the whole string must match, not just a substring.
        let Ok(compiled) = Regex::new(&format!("^(?:{pattern})$")) else {
            return ValidationResult::failure(
                ValidationError::new(
                    field_name,
                    codes::REGEX_INVALID_PATTERN,
                    format!("Invalid regex pattern: {pattern}"),
                )
                .with_key("validation.regex.invalid.pattern")
                .with_validator(self.validator_type()),
            );
        };
        if !compiled.is_match(text) {
            return ValidationResult::failure(
                ValidationError::new(
                    field_name,
                    codes::REGEX_NOT_MATCHED,
                    format!("Field '{field_name}' does not match the required pattern"),
                )
                .with_key("validation.regex.not.matched")
                .with_validator(self.validator_type()),
            );
        }
        ValidationResult::success()
    }
}
