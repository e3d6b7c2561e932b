use crate::error::{TemplateError, ValueError};
use std::{fmt, str::FromStr};

/// The type a capture or query parameter is parsed as.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Kind {
    Int,
    Double,
    Bool,
    String,
}

impl Kind {
    /// The name used for this kind in template patterns.
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Int => "int",
            Kind::Double => "double",
            Kind::Bool => "bool",
            Kind::String => "string",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "int" => Ok(Kind::Int),
            "double" => Ok(Kind::Double),
            "bool" => Ok(Kind::Bool),
            "string" => Ok(Kind::String),
            other => Err(TemplateError::UnknownKind(other.to_string())),
        }
    }
}

/// A single typed value extracted from, or supplied to, a URL.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum Value {
    Int(i64),
    Double(f64),
    Bool(bool),
    String(String),
}

impl Value {
    /// Parses `raw` as the given kind.
    ///
    /// `Bool` only accepts the literal tokens `true` and `false`; numbers use
    /// the standard [`FromStr`] rules. A `String` always parses.
    pub fn parse(kind: Kind, raw: &str) -> Option<Self> {
        match kind {
            Kind::Int => raw.parse().ok().map(Value::Int),
            Kind::Double => raw.parse().ok().map(Value::Double),
            Kind::Bool => raw.parse().ok().map(Value::Bool),
            Kind::String => Some(Value::String(raw.to_string())),
        }
    }

    pub fn kind(&self) -> Kind {
        match self {
            Value::Int(_) => Kind::Int,
            Value::Double(_) => Kind::Double,
            Value::Bool(_) => Kind::Bool,
            Value::String(_) => Kind::String,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{i}"),
            Value::Double(d) => write!(f, "{d}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::String(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

/// Converts a value found (or not found) in a bag into a concrete Rust type.
///
/// This is the seam used by application code that turns a
/// [`ValueBag`](crate::ValueBag) into its own typed object: each field asks
/// for the kind it expects, and gets a [`ValueError`] if the bag holds
/// something else.
pub trait FromValue
where
    Self: Sized,
{
    fn from_value(value: Option<&Value>, name: &str)
        -> Result<Self, ValueError>;
}

macro_rules! from_value {
    ($ty:ty, $variant:ident, $kind:expr) => {
        impl FromValue for $ty {
            fn from_value(
                value: Option<&Value>,
                name: &str,
            ) -> Result<Self, ValueError> {
                match value {
                    Some(Value::$variant(inner)) => Ok(inner.clone()),
                    Some(other) => Err(ValueError::KindMismatch {
                        name: name.to_string(),
                        expected: $kind,
                        found: other.kind(),
                    }),
                    None => Err(ValueError::Missing(name.to_string())),
                }
            }
        }
    };
}

from_value!(i64, Int, Kind::Int);
from_value!(f64, Double, Kind::Double);
from_value!(bool, Bool, Kind::Bool);
from_value!(String, String, Kind::String);

impl FromValue for Value {
    fn from_value(
        value: Option<&Value>,
        name: &str,
    ) -> Result<Self, ValueError> {
        value
            .cloned()
            .ok_or_else(|| ValueError::Missing(name.to_string()))
    }
}

impl<T> FromValue for Option<T>
where
    T: FromValue,
{
    fn from_value(
        value: Option<&Value>,
        name: &str,
    ) -> Result<Self, ValueError> {
        match value {
            None => Ok(None),
            Some(value) => T::from_value(Some(value), name).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_only_accepts_canonical_tokens() {
        assert_eq!(Value::parse(Kind::Bool, "true"), Some(Value::Bool(true)));
        assert_eq!(
            Value::parse(Kind::Bool, "false"),
            Some(Value::Bool(false))
        );
        assert_eq!(Value::parse(Kind::Bool, "1"), None);
        assert_eq!(Value::parse(Kind::Bool, "yes"), None);
        assert_eq!(Value::parse(Kind::Bool, "True"), None);
    }

    #[test]
    fn numbers_use_standard_parsing() {
        assert_eq!(Value::parse(Kind::Int, "42"), Some(Value::Int(42)));
        assert_eq!(Value::parse(Kind::Int, "-7"), Some(Value::Int(-7)));
        assert_eq!(Value::parse(Kind::Int, "4.2"), None);
        assert_eq!(Value::parse(Kind::Int, "abc"), None);
        assert_eq!(
            Value::parse(Kind::Double, "4.25"),
            Some(Value::Double(4.25))
        );
        assert_eq!(Value::parse(Kind::Double, "3"), Some(Value::Double(3.0)));
        assert_eq!(Value::parse(Kind::Double, "x"), None);
    }

    #[test]
    fn string_always_parses() {
        assert_eq!(
            Value::parse(Kind::String, ""),
            Some(Value::String(String::new()))
        );
    }

    #[test]
    fn kind_round_trips_through_its_name() {
        for kind in [Kind::Int, Kind::Double, Kind::Bool, Kind::String] {
            assert_eq!(kind.as_str().parse::<Kind>(), Ok(kind));
        }
        assert_eq!(
            "float".parse::<Kind>(),
            Err(TemplateError::UnknownKind("float".into()))
        );
    }

    #[test]
    fn from_value_reports_kind_mismatch() {
        let value = Value::String("42".into());
        assert_eq!(
            i64::from_value(Some(&value), "id"),
            Err(ValueError::KindMismatch {
                name: "id".into(),
                expected: Kind::Int,
                found: Kind::String,
            })
        );
        assert_eq!(
            i64::from_value(None, "id"),
            Err(ValueError::Missing("id".into()))
        );
    }

    #[test]
    fn optional_from_value_allows_absence() {
        assert_eq!(Option::<bool>::from_value(None, "flag"), Ok(None));
        assert_eq!(
            Option::<bool>::from_value(Some(&Value::Bool(true)), "flag"),
            Ok(Some(true))
        );
        assert!(
            Option::<bool>::from_value(Some(&Value::Int(1)), "flag").is_err()
        );
    }
}
