//! A data-driven validation engine for field/value records.
//!
//! Rules are data, not code: each [`ValidationRule`] names a field, a
//! validator type, optional parameters, and an optional [`Condition`] that
//! gates whether the rule applies to a given record. The [`Engine`] runs a
//! rule set against a [`Record`], exhaustively, and returns every
//! violation in one [`ValidationResult`] with stable error codes and
//! localizable messages.
//!
//! # Example
//!
//! ```
//! use formcheck::{when, Engine, Record, ValidationRule};
//!
//! let engine = Engine::new();
//! let rules = [
//!     ValidationRule::new("username", "required"),
//!     ValidationRule::new("password", "minLength").param("minLength", 8_i64),
//!     ValidationRule::new("licenseNumber", "required")
//!         .condition(when("age").gte(18_i64)),
//! ];
//!
//! let record = Record::new().set("username", "ada").set("age", 21_i64);
//! let result = engine.evaluate(&rules, &record);
//!
//! assert!(!result.is_valid());
//! assert_eq!(result.errors()[0].field_name.as_deref(), Some("licenseNumber"));
//! assert_eq!(result.errors()[0].error_code, "FIELD_REQUIRED");
//! ```
//!
//! Rule sets and records usually arrive as JSON; [`Engine::validate_json`]
//! parses both accepted rule-set shapes, evaluates, and localizes in one
//! call. Custom checks plug in through the [`validators::Validator`] trait
//! and [`Engine::register`].

mod condition;
mod engine;

pub mod locale;
pub mod serial;
pub mod types;
pub mod validators;

pub use engine::Engine;
pub use locale::{Locale, MessageCatalog};
pub use serial::ParseError;
pub use types::{
    codes, when, CoerceError, CompareOp, Comparison, Condition, FieldCond, Operand, Params,
    Record, ValidationError, ValidationResult, ValidationRule, Value, ValueKind,
};
pub use validators::{Validator, ValidatorRegistry};
