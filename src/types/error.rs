use std::fmt;

use serde::{Deserialize, Serialize};

use super::rule::Params;

/// Stable error codes produced by the engine and the built-in validators.
pub mod codes {
    pub const VALIDATOR_NOT_FOUND: &str = "VALIDATOR_NOT_FOUND";

    pub const FIELD_REQUIRED: &str = "FIELD_REQUIRED";

    pub const EMAIL_INVALID_TYPE: &str = "EMAIL_INVALID_TYPE";
    pub const EMAIL_INVALID_FORMAT: &str = "EMAIL_INVALID_FORMAT";

    pub const MIN_LENGTH_INVALID_TYPE: &str = "MIN_LENGTH_INVALID_TYPE";
    pub const MIN_LENGTH_PARAM_REQUIRED: &str = "MIN_LENGTH_PARAM_REQUIRED";
    pub const MIN_LENGTH_NOT_MET: &str = "MIN_LENGTH_NOT_MET";

    pub const MAX_LENGTH_INVALID_TYPE: &str = "MAX_LENGTH_INVALID_TYPE";
    pub const MAX_LENGTH_PARAM_REQUIRED: &str = "MAX_LENGTH_PARAM_REQUIRED";
    pub const MAX_LENGTH_EXCEEDED: &str = "MAX_LENGTH_EXCEEDED";

    pub const RANGE_INVALID_TYPE: &str = "RANGE_INVALID_TYPE";
    pub const RANGE_PARAM_REQUIRED: &str = "RANGE_PARAM_REQUIRED";
    pub const RANGE_BELOW_MIN: &str = "RANGE_BELOW_MIN";
    pub const RANGE_ABOVE_MAX: &str = "RANGE_ABOVE_MAX";

    pub const REGEX_INVALID_TYPE: &str = "REGEX_INVALID_TYPE";
    pub const REGEX_PARAM_REQUIRED: &str = "REGEX_PARAM_REQUIRED";
    pub const REGEX_INVALID_PATTERN: &str = "REGEX_INVALID_PATTERN";
    pub const REGEX_NOT_MATCHED: &str = "REGEX_NOT_MATCHED";
}

/// One reported violation: which field, a stable code, a human-readable
/// message, and the localization key and parameters behind it.
///
/// Constructed by validators (or by the engine itself for unknown
/// validator types) and immutable once the evaluation returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    pub field_name: Option<String>,
    pub error_code: String,
    pub error_message: String,
    #[serde(default)]
    pub error_message_key: Option<String>,
    #[serde(default)]
    pub error_message_params: Option<Params>,
    #[serde(default)]
    pub validator_type: Option<String>,
}

impl ValidationError {
    /// Create an error with a field, code, and message.
    #[must_use]
    pub fn new(field_name: &str, error_code: &str, error_message: impl Into<String>) -> Self {
        Self {
            field_name: Some(field_name.to_owned()),
            error_code: error_code.to_owned(),
            error_message: error_message.into(),
            error_message_key: None,
            error_message_params: None,
            validator_type: None,
        }
    }

    /// Attach the default localization key.
    #[must_use]
    pub fn with_key(mut self, key: &str) -> Self {
        self.error_message_key = Some(key.to_owned());
        self
    }

    /// Attach localization parameters.
    #[must_use]
    pub fn with_params(mut self, params: Params) -> Self {
        self.error_message_params = Some(params);
        self
    }

    /// Tag the error with the validator that produced it.
    #[must_use]
    pub fn with_validator(mut self, validator_type: &str) -> Self {
        self.validator_type = Some(validator_type.to_owned());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field_name {
            Some(field) => write!(f, "[{}] {}: {}", self.error_code, field, self.error_message),
            None => write!(f, "[{}] {}", self.error_code, self.error_message),
        }
    }
}
