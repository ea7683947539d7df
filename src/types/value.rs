use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Supported value types for records, rule parameters, and condition operands.
///
/// Deserializes untagged from any JSON value, so a record can be parsed
/// straight from a JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// The JSON `null`.
    Null,
    /// A boolean value.
    Bool(bool),
    /// A 64-bit signed integer.
    Int(i64),
    /// A 64-bit floating-point number.
    Float(f64),
    /// A UTF-8 string.
    String(String),
    /// An ordered sequence of values.
    Seq(Vec<Value>),
    /// A string-keyed mapping of values.
    Map(BTreeMap<String, Value>),
}

/// Runtime type tag of a [`Value`], used as a coercion target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Float,
    String,
    Seq,
    Map,
}

/// Error returned when a value cannot be converted to a target kind.
///
/// Callers inside the engine catch this and treat the comparison as false;
/// it never propagates out of an evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot convert {value} to {target}")]
pub struct CoerceError {
    pub value: String,
    pub target: ValueKind,
}

impl Value {
    /// The runtime kind of this value.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::String(_) => ValueKind::String,
            Value::Seq(_) => ValueKind::Seq,
            Value::Map(_) => ValueKind::Map,
        }
    }

    /// True for `Null`, a blank string, or an empty sequence/mapping.
    ///
    /// Non-`required` validators treat empty values as out of scope, so
    /// this is the single definition of "empty" shared by all of them.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.trim().is_empty(),
            Value::Seq(items) => items.is_empty(),
            Value::Map(entries) => entries.is_empty(),
            Value::Bool(_) | Value::Int(_) | Value::Float(_) => false,
        }
    }

    /// Ordering between two values, where one exists.
    /// Int and Float compare cross-type; everything else must match kinds.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn partial_cmp_value(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a.partial_cmp(b),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
            (Value::Int(a), Value::Float(b)) => (*a as f64).partial_cmp(b),
            (Value::Float(a), Value::Int(b)) => a.partial_cmp(&(*b as f64)),
            (Value::String(a), Value::String(b)) => a.partial_cmp(b),
            // Only equality is meaningful for bools; an ordering is still
            // returned so Eq/Ne work through the same path.
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Equality with Int/Float cross-type support.
    #[must_use]
    pub fn equals(&self, other: &Value) -> bool {
        match self.partial_cmp_value(other) {
            Some(ord) => ord == Ordering::Equal,
            None => self == other,
        }
    }

    /// Best-effort conversion to the target kind.
    ///
    /// # Errors
    ///
    /// Returns [`CoerceError`] when the conversion is not representable,
    /// e.g. a non-numeric string to `Int` or a sequence to `String`.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn coerce(&self, target: ValueKind) -> Result<Value, CoerceError> {
        if self.kind() == target {
            return Ok(self.clone());
        }
        let fail = || CoerceError {
            value: self.to_string(),
            target,
        };
        match target {
            ValueKind::String => match self {
                Value::Bool(b) => Ok(Value::String(b.to_string())),
                Value::Int(i) => Ok(Value::String(i.to_string())),
                Value::Float(f) => Ok(Value::String(f.to_string())),
                _ => Err(fail()),
            },
            ValueKind::Int => match self {
                Value::Float(f) if f.fract() == 0.0 => Ok(Value::Int(*f as i64)),
                Value::String(s) => s.trim().parse::<i64>().map(Value::Int).map_err(|_| fail()),
                _ => Err(fail()),
            },
            ValueKind::Float => match self {
                Value::Int(i) => Ok(Value::Float(*i as f64)),
                Value::String(s) => s
                    .trim()
                    .parse::<f64>()
                    .map(Value::Float)
                    .map_err(|_| fail()),
                _ => Err(fail()),
            },
            ValueKind::Bool => match self {
                Value::String(s) => s.trim().parse::<bool>().map(Value::Bool).map_err(|_| fail()),
                _ => Err(fail()),
            },
            ValueKind::Null | ValueKind::Seq | ValueKind::Map => Err(fail()),
        }
    }

    /// Numeric view of this value. Numeric-looking strings are accepted.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// String view of this value, without coercion.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Containment: substring for strings, element for sequences, value
    /// for mappings.
    #[must_use]
    pub fn contains(&self, needle: &Value) -> bool {
        match self {
            Value::String(s) => s.contains(&needle.render()),
            Value::Seq(items) => items.iter().any(|item| item.equals(needle)),
            Value::Map(entries) => entries.values().any(|v| v.equals(needle)),
            _ => false,
        }
    }

    /// String prefix match. False for non-string subjects.
    #[must_use]
    pub fn starts_with(&self, prefix: &Value) -> bool {
        match self {
            Value::String(s) => s.starts_with(&prefix.render()),
            _ => false,
        }
    }

    /// String suffix match. False for non-string subjects.
    #[must_use]
    pub fn ends_with(&self, suffix: &Value) -> bool {
        match self {
            Value::String(s) => s.ends_with(&suffix.render()),
            _ => false,
        }
    }

    /// Membership of `self` in `collection`: a sequence element, a mapping
    /// value, or one part of a comma-separated string.
    #[must_use]
    pub fn is_in(&self, collection: &Value) -> bool {
        match collection {
            Value::Seq(items) => items.iter().any(|item| item.equals(self)),
            Value::Map(entries) => entries.values().any(|v| v.equals(self)),
            Value::String(s) => {
                let rendered = self.render();
                s.split(',').any(|part| part.trim() == rendered)
            }
            _ => false,
        }
    }

    /// Plain rendering without the quoting that `Display` applies to
    /// strings. Used for substring matching and message substitution.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Seq(v)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(v: BTreeMap<String, Value>) -> Self {
        Value::Map(v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "\"{v}\""),
            Value::Seq(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Map(entries) => {
                write!(f, "{{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::String => "string",
            ValueKind::Seq => "sequence",
            ValueKind::Map => "mapping",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_conversions() {
        assert_eq!(Value::from(42_i64), Value::Int(42));
        assert_eq!(Value::from(3.5_f64), Value::Float(3.5));
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from("hello"), Value::String("hello".to_owned()));
    }

    #[test]
    fn kind_matches_variant() {
        assert_eq!(Value::Null.kind(), ValueKind::Null);
        assert_eq!(Value::Int(1).kind(), ValueKind::Int);
        assert_eq!(Value::Seq(vec![]).kind(), ValueKind::Seq);
    }

    #[test]
    fn cmp_int() {
        let a = Value::Int(10);
        let b = Value::Int(20);
        assert_eq!(a.partial_cmp_value(&b), Some(Ordering::Less));
        assert_eq!(b.partial_cmp_value(&a), Some(Ordering::Greater));
        assert_eq!(a.partial_cmp_value(&a), Some(Ordering::Equal));
    }

    #[test]
    fn cmp_int_float_cross_type() {
        let i = Value::Int(10);
        let f = Value::Float(10.0);
        assert_eq!(i.partial_cmp_value(&f), Some(Ordering::Equal));
        assert!(i.equals(&f));
        assert_eq!(
            Value::Float(10.5).partial_cmp_value(&i),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn cmp_string() {
        let a = Value::from("apple");
        let b = Value::from("banana");
        assert_eq!(a.partial_cmp_value(&b), Some(Ordering::Less));
    }

    #[test]
    fn cmp_type_mismatch_returns_none() {
        assert_eq!(Value::Int(1).partial_cmp_value(&Value::from("1")), None);
        assert_eq!(Value::Bool(true).partial_cmp_value(&Value::Int(1)), None);
    }

    #[test]
    fn coerce_string_to_int() {
        assert_eq!(Value::from("42").coerce(ValueKind::Int), Ok(Value::Int(42)));
        assert!(Value::from("forty-two").coerce(ValueKind::Int).is_err());
    }

    #[test]
    fn coerce_string_to_float_and_bool() {
        assert_eq!(
            Value::from("2.5").coerce(ValueKind::Float),
            Ok(Value::Float(2.5))
        );
        assert_eq!(
            Value::from("true").coerce(ValueKind::Bool),
            Ok(Value::Bool(true))
        );
        assert!(Value::from("yes").coerce(ValueKind::Bool).is_err());
    }

    #[test]
    fn coerce_number_to_string() {
        assert_eq!(Value::Int(7).coerce(ValueKind::String), Ok(Value::from("7")));
    }

    #[test]
    fn coerce_float_to_int_only_when_whole() {
        assert_eq!(Value::Float(4.0).coerce(ValueKind::Int), Ok(Value::Int(4)));
        assert!(Value::Float(4.5).coerce(ValueKind::Int).is_err());
    }

    #[test]
    fn coerce_same_kind_is_identity() {
        let v = Value::from("abc");
        assert_eq!(v.coerce(ValueKind::String), Ok(v));
    }

    #[test]
    fn coerce_seq_to_string_fails() {
        let err = Value::Seq(vec![Value::Int(1)])
            .coerce(ValueKind::String)
            .unwrap_err();
        assert_eq!(err.target, ValueKind::String);
    }

    #[test]
    fn is_empty_variants() {
        assert!(Value::Null.is_empty());
        assert!(Value::from("   ").is_empty());
        assert!(Value::Seq(vec![]).is_empty());
        assert!(Value::Map(BTreeMap::new()).is_empty());
        assert!(!Value::Int(0).is_empty());
        assert!(!Value::Bool(false).is_empty());
        assert!(!Value::from("x").is_empty());
    }

    #[test]
    fn contains_string_substring() {
        assert!(Value::from("hello world").contains(&Value::from("lo wo")));
        assert!(!Value::from("hello").contains(&Value::from("xyz")));
    }

    #[test]
    fn contains_seq_element() {
        let seq = Value::Seq(vec![Value::Int(1), Value::Int(2)]);
        assert!(seq.contains(&Value::Int(2)));
        assert!(seq.contains(&Value::Float(1.0)));
        assert!(!seq.contains(&Value::Int(3)));
    }

    #[test]
    fn contains_map_values() {
        let mut entries = BTreeMap::new();
        entries.insert("a".to_owned(), Value::from("red"));
        let map = Value::Map(entries);
        assert!(map.contains(&Value::from("red")));
        assert!(!map.contains(&Value::from("a")));
    }

    #[test]
    fn is_in_seq_and_map() {
        let seq = Value::Seq(vec![Value::from("a"), Value::from("b")]);
        assert!(Value::from("a").is_in(&seq));
        assert!(!Value::from("c").is_in(&seq));
    }

    #[test]
    fn is_in_comma_separated_string() {
        let options = Value::from("red,green,blue");
        assert!(Value::from("green").is_in(&options));
        assert!(!Value::from("purple").is_in(&options));
        // Numbers render without quotes before matching.
        assert!(Value::Int(2).is_in(&Value::from("1,2,3")));
    }

    #[test]
    fn starts_and_ends_with() {
        let v = Value::from("prefix-body-suffix");
        assert!(v.starts_with(&Value::from("prefix")));
        assert!(v.ends_with(&Value::from("suffix")));
        assert!(!Value::Int(5).starts_with(&Value::from("5")));
    }

    #[test]
    fn display_and_render() {
        assert_eq!(Value::from("hi").to_string(), "\"hi\"");
        assert_eq!(Value::from("hi").render(), "hi");
        assert_eq!(Value::Int(3).render(), "3");
        assert_eq!(
            Value::Seq(vec![Value::Int(1), Value::from("a")]).to_string(),
            "[1, \"a\"]"
        );
    }

    #[test]
    fn deserializes_untagged_json() {
        let v: Value = serde_json::from_str("{\"a\": [1, 2.5, \"x\", null, true]}").unwrap();
        let Value::Map(entries) = v else {
            panic!("expected map");
        };
        assert_eq!(
            entries["a"],
            Value::Seq(vec![
                Value::Int(1),
                Value::Float(2.5),
                Value::from("x"),
                Value::Null,
                Value::Bool(true),
            ])
        );
    }
}
