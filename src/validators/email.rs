use regex::Regex;

use super::{is_absent, Validator};
use crate::types::{codes, Params, Record, ValidationError, ValidationResult, Value};

/// Local-part@domain with at least one dot in the domain.
const EMAIL_PATTERN: &str =
    r"^[A-Za-z0-9_+&*-]+(?:\.[A-Za-z0-9_+&*-]+)*@(?:[A-Za-z0-9-]+\.)+[A-Za-z]{2,7}$";

/// Fails when the value is not a string or does not match a standard
/// email grammar. Empty values pass (out of scope, see module docs).
pub struct EmailValidator {
    pattern: Regex,
}

impl EmailValidator {
    /// # Panics
    ///
    /// Never: the pattern is a checked constant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"),
        }
    }
}

impl Default for EmailValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for EmailValidator {
    fn validator_type(&self) -> &'static str {
        "email"
    }

    fn validate(
        &self,
        field_name: &str,
        value: Option<&Value>,
        _params: &Params,
        _record: &Record,
    ) -> ValidationResult {
        if is_absent(value) {
            return ValidationResult::success();
        }
        let Some(email) = value.and_then(Value::as_str) else {
            return ValidationResult::failure(
                ValidationError::new(
                    field_name,
                    codes::EMAIL_INVALID_TYPE,
                    format!("Field '{field_name}' must be a string"),
                )
                .with_key("validation.email.invalid.type")
                .with_validator(self.validator_type()),
            );
        };
        if !self.pattern.is_match(email) {
            return ValidationResult::failure(
                ValidationError::new(
                    field_name,
                    codes::EMAIL_INVALID_FORMAT,
                    format!("Field '{field_name}' is not a valid email address"),
                )
                .with_key("validation.email.invalid.format")
                .with_validator(self.validator_type()),
            );
        }
        ValidationResult::success()
    }
}
