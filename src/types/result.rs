use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::ValidationError;

/// Aggregate outcome of one evaluation: a validity flag plus the ordered
/// list of violations.
///
/// `is_valid` is always the conjunction "errors is empty"; adding an error
/// flips it to false. Results compose with [`merge`](Self::merge), which
/// concatenates error lists in discovery order and ANDs validity — the
/// composition is associative, which is what lets parent and child rule
/// outcomes fold into one result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[must_use]
pub struct ValidationResult {
    is_valid: bool,
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// A passing result with no errors.
    pub fn success() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    /// A failing result carrying one error.
    pub fn failure(error: ValidationError) -> Self {
        Self {
            is_valid: false,
            errors: vec![error],
        }
    }

    /// Append one error, marking the result invalid.
    pub fn add_error(&mut self, error: ValidationError) {
        self.is_valid = false;
        self.errors.push(error);
    }

    /// Fold another result into this one, preserving error order.
    pub fn merge(&mut self, other: ValidationResult) {
        self.is_valid = self.is_valid && other.is_valid;
        self.errors.extend(other.errors);
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Consume the result, yielding the error list.
    #[must_use]
    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }

    /// Mutable access for the engine's message override pass.
    pub(crate) fn errors_mut(&mut self) -> &mut [ValidationError] {
        &mut self.errors
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid {
            write!(f, "valid")
        } else {
            write!(f, "invalid ({} errors)", self.errors.len())
        }
    }
}
