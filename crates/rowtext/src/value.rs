use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;
use time::{OffsetDateTime, macros::datetime};

use crate::error::DecodeError;

/// The timestamp returned for the all-zero date sentinel `0000-00-00`.
pub const ZERO_TIMESTAMP: OffsetDateTime = datetime!(0001-01-01 0:00 UTC);

/// A decoded database value.
#[derive(Clone, Debug)]
pub enum Value {
    Null,
    Bool(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    String(String),
    Timestamp(OffsetDateTime),
    Array(Vec<Value>),
    /// A fixed-arity record, positionally typed by the tuple's element types.
    Tuple(Vec<Value>),
    Map(IndexMap<Value, Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Name of this value's variant, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Boolean",
            Value::Int8(_) => "Int8",
            Value::Int16(_) => "Int16",
            Value::Int32(_) => "Int32",
            Value::Int64(_) => "Int64",
            Value::UInt8(_) => "UInt8",
            Value::UInt16(_) => "UInt16",
            Value::UInt32(_) => "UInt32",
            Value::UInt64(_) => "UInt64",
            Value::Float32(_) => "Float32",
            Value::Float64(_) => "Float64",
            Value::String(_) => "String",
            Value::Timestamp(_) => "Timestamp",
            Value::Array(_) => "Array",
            Value::Tuple(_) => "Tuple",
            Value::Map(_) => "Map",
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Value::Int8(_)
                | Value::Int16(_)
                | Value::Int32(_)
                | Value::Int64(_)
                | Value::UInt8(_)
                | Value::UInt16(_)
                | Value::UInt32(_)
                | Value::UInt64(_)
        )
    }

    pub fn int64(&self) -> Result<i64, DecodeError> {
        match *self {
            Value::Int8(v) => Ok(v.into()),
            Value::Int16(v) => Ok(v.into()),
            Value::Int32(v) => Ok(v.into()),
            Value::Int64(v) => Ok(v),
            Value::UInt8(v) => Ok(v.into()),
            Value::UInt16(v) => Ok(v.into()),
            Value::UInt32(v) => Ok(v.into()),
            Value::UInt64(v) => Ok(i64::try_from(v)?),
            _ => Err(DecodeError::Conversion("not an integer".into())),
        }
    }

    pub fn uint64(&self) -> Result<u64, DecodeError> {
        match *self {
            Value::UInt8(v) => Ok(v.into()),
            Value::UInt16(v) => Ok(v.into()),
            Value::UInt32(v) => Ok(v.into()),
            Value::UInt64(v) => Ok(v),
            Value::Int8(_) | Value::Int16(_) | Value::Int32(_) | Value::Int64(_) => {
                Ok(u64::try_from(self.int64()?)?)
            }
            _ => Err(DecodeError::Conversion("not an integer".into())),
        }
    }

    pub fn double(&self) -> Result<f64, DecodeError> {
        match *self {
            Value::Float32(v) => Ok(v.into()),
            Value::Float64(v) => Ok(v),
            Value::UInt64(v) => Ok(v as f64),
            _ if self.is_integer() => Ok(self.int64()? as f64),
            _ => Err(DecodeError::Conversion("not a number".into())),
        }
    }

    pub fn text(&self) -> Result<&str, DecodeError> {
        match self {
            Value::String(v) => Ok(v),
            _ => Err(DecodeError::Conversion("not text".into())),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int8(a), Value::Int8(b)) => a == b,
            (Value::Int16(a), Value::Int16(b)) => a == b,
            (Value::Int32(a), Value::Int32(b)) => a == b,
            (Value::Int64(a), Value::Int64(b)) => a == b,
            (Value::UInt8(a), Value::UInt8(b)) => a == b,
            (Value::UInt16(a), Value::UInt16(b)) => a == b,
            (Value::UInt32(a), Value::UInt32(b)) => a == b,
            (Value::UInt64(a), Value::UInt64(b)) => a == b,
            // bitwise, so that values stay usable as map keys
            (Value::Float32(a), Value::Float32(b)) => a.to_bits() == b.to_bits(),
            (Value::Float64(a), Value::Float64(b)) => a.to_bits() == b.to_bits(),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Timestamp(a), Value::Timestamp(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Tuple(a), Value::Tuple(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Bool(v) => v.hash(state),
            Value::Int8(v) => v.hash(state),
            Value::Int16(v) => v.hash(state),
            Value::Int32(v) => v.hash(state),
            Value::Int64(v) => v.hash(state),
            Value::UInt8(v) => v.hash(state),
            Value::UInt16(v) => v.hash(state),
            Value::UInt32(v) => v.hash(state),
            Value::UInt64(v) => v.hash(state),
            Value::Float32(v) => v.to_bits().hash(state),
            Value::Float64(v) => v.to_bits().hash(state),
            Value::String(v) => v.hash(state),
            Value::Timestamp(v) => v.hash(state),
            Value::Array(v) | Value::Tuple(v) => v.hash(state),
            // map equality ignores entry order
            Value::Map(v) => v.len().hash(state),
        }
    }
}

/// What a decoder produces, mirroring the shape of its type descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    String,
    Timestamp,
    Array(Box<Kind>),
    Tuple(Vec<Kind>),
    Map(Box<Kind>, Box<Kind>),
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Null => f.pad("Null"),
            Kind::Bool => f.pad("Boolean"),
            Kind::Int8 => f.pad("Int8"),
            Kind::Int16 => f.pad("Int16"),
            Kind::Int32 => f.pad("Int32"),
            Kind::Int64 => f.pad("Int64"),
            Kind::UInt8 => f.pad("UInt8"),
            Kind::UInt16 => f.pad("UInt16"),
            Kind::UInt32 => f.pad("UInt32"),
            Kind::UInt64 => f.pad("UInt64"),
            Kind::Float32 => f.pad("Float32"),
            Kind::Float64 => f.pad("Float64"),
            Kind::String => f.pad("String"),
            Kind::Timestamp => f.pad("Timestamp"),
            Kind::Array(element) => write!(f, "Array({element})"),
            Kind::Tuple(elements) => {
                f.write_str("Tuple(")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{element}")?;
                }
                f.write_str(")")
            }
            Kind::Map(key, value) => write!(f, "Map({key}, {value})"),
        }
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )+
    };
}

value_from!(
    bool => Bool,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    f32 => Float32,
    f64 => Float64,
    String => String,
    OffsetDateTime => Timestamp,
);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Array(v.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<Value>, V: Into<Value>> From<IndexMap<K, V>> for Value {
    fn from(v: IndexMap<K, V>) -> Self {
        Value::Map(v.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floats_compare_by_bits() {
        assert_eq!(Value::Float64(f64::NAN), Value::Float64(f64::NAN));
        assert_ne!(Value::Float64(0.0), Value::Float64(-0.0));
        assert_ne!(Value::Int32(1), Value::Int64(1));
    }

    #[test]
    fn maps_compare_without_order() {
        let mut a = IndexMap::new();
        a.insert(Value::from("a"), Value::Int32(1));
        a.insert(Value::from("b"), Value::Int32(2));
        let mut b = IndexMap::new();
        b.insert(Value::from("b"), Value::Int32(2));
        b.insert(Value::from("a"), Value::Int32(1));
        assert_eq!(Value::Map(a), Value::Map(b));
    }

    #[test]
    fn integer_accessors_range_check() {
        assert_eq!(Value::UInt8(200).int64().unwrap(), 200);
        assert!(Value::UInt64(u64::MAX).int64().is_err());
        assert!(Value::Int8(-1).uint64().is_err());
        assert_eq!(Value::Int32(7).double().unwrap(), 7.0);
        assert!(Value::from("7").double().is_err());
    }

    #[test]
    fn kind_display() {
        let kind = Kind::Map(
            Box::new(Kind::String),
            Box::new(Kind::Tuple(vec![Kind::Int32, Kind::Array(Box::new(Kind::Timestamp))])),
        );
        assert_eq!(kind.to_string(), "Map(String, Tuple(Int32, Array(Timestamp)))");
    }
}
