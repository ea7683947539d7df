//! The validator extension mechanism and the built-in validators.
//!
//! A validator is a pure function of `(field name, value, params, record)`
//! to a [`ValidationResult`]. Every built-in except `required` treats an
//! absent or empty value as out of scope and passes, so rules compose: a
//! field can carry both a `required` rule and a `minLength` rule without
//! the latter double-reporting on empty input.

mod email;
mod length;
mod pattern;
mod range;
mod required;

use std::collections::HashMap;

use tracing::{debug, warn};

pub use email::EmailValidator;
pub use length::{MaxLengthValidator, MinLengthValidator};
pub use pattern::RegexValidator;
pub use range::RangeValidator;
pub use required::RequiredValidator;

use crate::types::{Params, Record, ValidationResult, Value};

/// A named, pure validation function for one field value.
///
/// Implementations must be stateless (or internally immutable): the
/// registry is shared read-only across concurrent evaluations.
pub trait Validator: Send + Sync {
    /// Registry tag, e.g. `"minLength"`.
    fn validator_type(&self) -> &'static str;

    /// Check one field value. `value` is `None` when the record has no
    /// such field; the whole record is available for cross-field checks.
    fn validate(
        &self,
        field_name: &str,
        value: Option<&Value>,
        params: &Params,
        record: &Record,
    ) -> ValidationResult;
}

/// Mapping from validator-type tag to implementation.
///
/// Built once at startup and logically immutable afterwards; evaluation
/// only reads it, so it needs no per-call locking.
#[derive(Default)]
pub struct ValidatorRegistry {
    validators: HashMap<String, Box<dyn Validator>>,
}

impl ValidatorRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-populated with every built-in validator.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(RequiredValidator));
        registry.register(Box::new(EmailValidator::new()));
        registry.register(Box::new(MinLengthValidator));
        registry.register(Box::new(MaxLengthValidator));
        registry.register(Box::new(RangeValidator));
        registry.register(Box::new(RegexValidator));
        registry
    }

    /// Register a validator under its own type tag. A duplicate tag
    /// replaces the previous registration.
    pub fn register(&mut self, validator: Box<dyn Validator>) {
        let tag = validator.validator_type();
        if self.validators.contains_key(tag) {
            warn!(validator_type = tag, "duplicate validator registration, replacing");
        } else {
            debug!(validator_type = tag, "registered validator");
        }
        self.validators.insert(tag.to_owned(), validator);
    }

    /// Look up a validator by type tag.
    #[must_use]
    pub fn lookup(&self, validator_type: &str) -> Option<&dyn Validator> {
        self.validators.get(validator_type).map(Box::as_ref)
    }

    #[must_use]
    pub fn contains(&self, validator_type: &str) -> bool {
        self.validators.contains_key(validator_type)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

/// Shared emptiness policy: `None`, `null`, blank strings, and empty
/// collections are all "absent".
pub(crate) fn is_absent(value: Option<&Value>) -> bool {
    value.is_none_or(Value::is_empty)
}

/// Integer parameter, accepting numeric strings and whole floats.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn int_param(params: &Params, key: &str) -> Option<i64> {
    match params.get(key)? {
        Value::Int(i) => Some(*i),
        Value::Float(f) if f.fract() == 0.0 => Some(*f as i64),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Numeric parameter, accepting numeric strings.
pub(crate) fn float_param(params: &Params, key: &str) -> Option<f64> {
    params.get(key).and_then(Value::as_f64)
}

/// String parameter; scalar values render to their plain form.
pub(crate) fn str_param(params: &Params, key: &str) -> Option<String> {
    match params.get(key)? {
        Value::Null | Value::Seq(_) | Value::Map(_) => None,
        scalar => Some(scalar.render()),
    }
}
