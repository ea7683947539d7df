use super::{int_param, is_absent, Validator};
use crate::types::{codes, Params, Record, ValidationError, ValidationResult, Value};

fn bound_params(key: &str, bound: i64) -> Params {
    let mut params = Params::new();
    params.insert(key.to_owned(), Value::Int(bound));
    params
}

/// Fails when a string is shorter than the `minLength` parameter
/// (inclusive bound, counted in characters).
pub struct MinLengthValidator;

impl Validator for MinLengthValidator {
    fn validator_type(&self) -> &'static str {
        "minLength"
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
                    codes::MIN_LENGTH_INVALID_TYPE,
                    format!("Field '{field_name}' must be a string"),
                )
                .with_key("validation.min.length.invalid.type")
                .with_validator(self.validator_type()),
            );
        };
        let Some(min_length) = int_param(params, "minLength") else {
            return ValidationResult::failure(
                ValidationError::new(
                    field_name,
                    codes::MIN_LENGTH_PARAM_REQUIRED,
                    "Min length parameter is required",
                )
                .with_key("validation.min.length.param.required")
                .with_validator(self.validator_type()),
            );
        };
        if (text.chars().count() as i64) < min_length {
            return ValidationResult::failure(
                ValidationError::new(
                    field_name,
                    codes::MIN_LENGTH_NOT_MET,
                    format!("Field '{field_name}' must be at least {min_length} characters long"),
                )
                .with_key("validation.min.length")
                .with_params(bound_params("minLength", min_length))
                .with_validator(self.validator_type()),
            );
        }
        ValidationResult::success()
    }
}

/// Fails when a string is longer than the `maxLength` parameter
/// (inclusive bound, counted in characters).
pub struct MaxLengthValidator;

impl Validator for MaxLengthValidator {
    fn validator_type(&self) -> &'static str {
        "maxLength"
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
                    codes::MAX_LENGTH_INVALID_TYPE,
                    format!("Field '{field_name}' must be a string"),
                )
                .with_key("validation.max.length.invalid.type")
                .with_validator(self.validator_type()),
            );
        };
        let Some(max_length) = int_param(params, "maxLength") else {
            return ValidationResult::failure(
                ValidationError::new(
                    field_name,
                    codes::MAX_LENGTH_PARAM_REQUIRED,
                    "Max length parameter is required",
                )
                .with_key("validation.max.length.param.required")
                .with_validator(self.validator_type()),
            );
        };
        if (text.chars().count() as i64) > max_length {
            return ValidationResult::failure(
                ValidationError::new(
                    field_name,
                    codes::MAX_LENGTH_EXCEEDED,
                    format!("Field '{field_name}' must be at most {max_length} characters long"),
                )
                .with_key("validation.max.length.exceeded")
                .with_params(bound_params("maxLength", max_length))
                .with_validator(self.validator_type()),
            );
        }
        ValidationResult::success()
    }
}
