//! Scalar values and typed conversion.

use serde::{Deserialize, Serialize};

/// A primitive value as stored by a backend.
///
/// Serialized with an explicit type tag so that `1` and `1.0` never collapse
/// into the same kind:
///
/// ```json
/// { "type": "int", "value": 1 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Scalar {
    /// Boolean flag.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// UTF-8 text.
    Text(String),
}

impl Scalar {
    /// Get the kind of this value.
    #[must_use]
    pub const fn kind(&self) -> ScalarKind {
        match self {
            Self::Bool(_) => ScalarKind::Bool,
            Self::Int(_) => ScalarKind::Int,
            Self::Float(_) => ScalarKind::Float,
            Self::Text(_) => ScalarKind::Text,
        }
    }
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
        }
    }
}

/// Discriminant of a [`Scalar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    Int,
    Float,
    Text,
}

impl std::fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool => write!(f, "bool"),
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::Text => write!(f, "text"),
        }
    }
}

/// A Rust type that can be stored as a setting.
///
/// Conversion out of a [`Scalar`] is checked: the kind must match and the value
/// must fit the target type. Anything else yields `None`.
pub trait SettingValue: Clone + Sized {
    /// Scalar kind this type is stored as.
    const KIND: ScalarKind;

    /// Convert into the stored representation.
    fn into_scalar(self) -> Scalar;

    /// Convert from the stored representation.
    fn from_scalar(scalar: Scalar) -> Option<Self>;
}

impl SettingValue for bool {
    const KIND: ScalarKind = ScalarKind::Bool;

    fn into_scalar(self) -> Scalar {
        Scalar::Bool(self)
    }

    fn from_scalar(scalar: Scalar) -> Option<Self> {
        match scalar {
            Scalar::Bool(v) => Some(v),
            _ => None,
        }
    }
}

impl SettingValue for String {
    const KIND: ScalarKind = ScalarKind::Text;

    fn into_scalar(self) -> Scalar {
        Scalar::Text(self)
    }

    fn from_scalar(scalar: Scalar) -> Option<Self> {
        match scalar {
            Scalar::Text(v) => Some(v),
            _ => None,
        }
    }
}

macro_rules! impl_integer_setting {
    ($($ty:ty),* $(,)?) => {
        $(
            impl SettingValue for $ty {
                const KIND: ScalarKind = ScalarKind::Int;

                fn into_scalar(self) -> Scalar {
                    Scalar::Int(i64::from(self))
                }

                fn from_scalar(scalar: Scalar) -> Option<Self> {
                    match scalar {
                        Scalar::Int(v) => <$ty>::try_from(v).ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_integer_setting!(i8, i16, i32, i64, u8, u16, u32);

impl SettingValue for f64 {
    const KIND: ScalarKind = ScalarKind::Float;

    fn into_scalar(self) -> Scalar {
        Scalar::Float(self)
    }

    fn from_scalar(scalar: Scalar) -> Option<Self> {
        match scalar {
            Scalar::Float(v) => Some(v),
            _ => None,
        }
    }
}

impl SettingValue for f32 {
    const KIND: ScalarKind = ScalarKind::Float;

    fn into_scalar(self) -> Scalar {
        Scalar::Float(f64::from(self))
    }

    #[allow(clippy::cast_possible_truncation)]
    fn from_scalar(scalar: Scalar) -> Option<Self> {
        match scalar {
            // Finite values that overflow f32 would silently become infinity.
            Scalar::Float(v) if v.is_finite() && v.abs() > f64::from(Self::MAX) => None,
            Scalar::Float(v) => Some(v as Self),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_serialization_is_tagged() {
        let json = serde_json::to_string(&Scalar::Text("Dark".to_string())).unwrap();
        assert_eq!(json, r#"{"type":"text","value":"Dark"}"#);

        let int: Scalar = serde_json::from_str(r#"{"type":"int","value":1}"#).unwrap();
        let float: Scalar = serde_json::from_str(r#"{"type":"float","value":1.0}"#).unwrap();
        assert_eq!(int.kind(), ScalarKind::Int);
        assert_eq!(float.kind(), ScalarKind::Float);
    }

    #[test]
    fn test_kind_mismatch_is_rejected() {
        assert_eq!(String::from_scalar(Scalar::Int(7)), None);
        assert_eq!(i64::from_scalar(Scalar::Float(7.0)), None);
        assert_eq!(f64::from_scalar(Scalar::Int(7)), None);
        assert_eq!(bool::from_scalar(Scalar::Text("true".to_string())), None);
    }

    #[test]
    fn test_integer_narrowing() {
        assert_eq!(u8::from_scalar(Scalar::Int(255)), Some(255));
        assert_eq!(u8::from_scalar(Scalar::Int(256)), None);
        assert_eq!(u32::from_scalar(Scalar::Int(-1)), None);
        assert_eq!(i16::from_scalar(Scalar::Int(-32768)), Some(i16::MIN));
        assert_eq!(i64::from_scalar(Scalar::Int(i64::MAX)), Some(i64::MAX));
    }

    #[test]
    fn test_f32_conversion() {
        let stored = 1.5f32.into_scalar();
        assert_eq!(f32::from_scalar(stored), Some(1.5));
        assert_eq!(f32::from_scalar(Scalar::Float(1e300)), None);
        assert_eq!(
            f32::from_scalar(Scalar::Float(f64::INFINITY)),
            Some(f32::INFINITY)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Scalar::Bool(true).to_string(), "true");
        assert_eq!(Scalar::Int(-3).to_string(), "-3");
        assert_eq!(Scalar::Text("Light".to_string()).to_string(), "Light");
        assert_eq!(ScalarKind::Float.to_string(), "float");
    }
}
