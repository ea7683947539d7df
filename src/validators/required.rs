use super::{is_absent, Validator};
use crate::types::{codes, Params, Record, ValidationError, ValidationResult, Value};

/// Fails when the value is null, a blank string, or an empty
/// sequence/mapping. The only built-in that reports on missing values;
/// every other validator leaves required-ness to this one.
pub struct RequiredValidator;

impl Validator for RequiredValidator {
    fn validator_type(&self) -> &'static str {
        "required"
    }

    fn validate(
        &self,
        field_name: &str,
        value: Option<&Value>,
        _params: &Params,
        _record: &Record,
    ) -> ValidationResult {
        if is_absent(value) {
            ValidationResult::failure(
                ValidationError::new(
                    field_name,
                    codes::FIELD_REQUIRED,
                    format!("Field '{field_name}' is required"),
                )
                .with_key("validation.required")
                .with_validator(self.validator_type()),
            )
        } else {
            ValidationResult::success()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(value: Option<&Value>) -> ValidationResult {
        RequiredValidator.validate("username", value, &Params::new(), &Record::new())
    }

    #[test]
    fn missing_value_fails() {
        let result = run(None);
        assert!(!result.is_valid());
        assert_eq!(result.errors()[0].error_code, codes::FIELD_REQUIRED);
        assert_eq!(result.errors()[0].field_name.as_deref(), Some("username"));
        assert_eq!(result.errors()[0].validator_type.as_deref(), Some("required"));
    }

    #[test]
    fn null_and_blank_fail() {
        assert!(!run(Some(&Value::Null)).is_valid());
        assert!(!run(Some(&Value::from("   "))).is_valid());
        assert!(!run(Some(&Value::Seq(vec![]))).is_valid());
    }

    #[test]
    fn present_values_pass() {
        assert!(run(Some(&Value::from("alice"))).is_valid());
        assert!(run(Some(&Value::Int(0))).is_valid());
        assert!(run(Some(&Value::Bool(false))).is_valid());
    }
}
