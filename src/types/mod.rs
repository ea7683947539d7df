pub(crate) mod condition;
pub(crate) mod error;
pub(crate) mod record;
pub(crate) mod rule;
pub(crate) mod value;

mod result;

pub use condition::{when, CompareOp, Comparison, Condition, FieldCond, Operand};
pub use error::{codes, ValidationError};
pub use record::Record;
pub use result::ValidationResult;
pub use rule::{Params, ValidationRule};
pub use value::{CoerceError, Value, ValueKind};
