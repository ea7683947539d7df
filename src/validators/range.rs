use super::{float_param, is_absent, Validator};
use crate::types::{codes, Params, Record, ValidationError, ValidationResult, Value};

/// Fails when a numeric value falls outside the supplied `min`/`max`
/// bounds (inclusive). Numeric-looking strings are accepted via coercion;
/// at least one bound must be supplied.
pub struct RangeValidator;

fn bound_params(key: &str, bound: f64) -> Params {
    let mut params = Params::new();
    params.insert(key.to_owned(), Value::Float(bound));
    params
}

impl Validator for RangeValidator {
    fn validator_type(&self) -> &'static str {
        "range"
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
        let Some(number) = value.and_then(Value::as_f64) else {
            return ValidationResult::failure(
                ValidationError::new(
                    field_name,
                    codes::RANGE_INVALID_TYPE,
                    format!("Field '{field_name}' must be a number"),
                )
                .with_key("validation.range.invalid.type")
                .with_validator(self.validator_type()),
            );
        };

        let min = float_param(params, "min");
        let max = float_param(params, "max");
        if min.is_none() && max.is_none() {
            return ValidationResult::failure(
                ValidationError::new(
                    field_name,
                    codes::RANGE_PARAM_REQUIRED,
                    "At least one of min or max parameters is required",
                )
                .with_key("validation.range.param.required")
                .with_validator(self.validator_type()),
            );
        }

        if let Some(min) = min {
            if number < min {
                return ValidationResult::failure(
                    ValidationError::new(
                        field_name,
                        codes::RANGE_BELOW_MIN,
                        format!("Field '{field_name}' must be at least {min}"),
                    )
                    .with_key("validation.range.min")
                    .with_params(bound_params("min", min))
                    .with_validator(self.validator_type()),
                );
            }
        }
        if let Some(max) = max {
            if number > max {
                return ValidationResult::failure(
                    ValidationError::new(
                        field_name,
                        codes::RANGE_ABOVE_MAX,
                        format!("Field '{field_name}' must be at most {max}"),
                    )
                    .with_key("validation.range.max")
                    .with_params(bound_params("max", max))
                    .with_validator(self.validator_type()),
                );
            }
        }
        ValidationResult::success()
    }
}
