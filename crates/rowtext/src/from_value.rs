//! Provides [`FromValue`] for extracting Rust types from decoded values.
use std::result::Result as StdResult;

use crate::{Value, error::DecodeError};

/// A type that can be extracted from a decoded [`Value`].
pub trait FromValue<'r>: Sized {
    /// Convert a decoded value into this type.
    fn from_value(value: &'r Value) -> StdResult<Self, DecodeError>;
}

// implement `FromValue` for Option<T> for all supported types
impl<'r, T> FromValue<'r> for Option<T>
where
    T: FromValue<'r>,
{
    fn from_value(value: &'r Value) -> StdResult<Self, DecodeError> {
        if value.is_null() {
            Ok(None)
        } else {
            Ok(Some(T::from_value(value)?))
        }
    }
}

impl<'r> FromValue<'r> for Value {
    fn from_value(value: &'r Value) -> StdResult<Self, DecodeError> {
        Ok(value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_maps_null_to_none() {
        assert_eq!(Option::<i32>::from_value(&Value::Null).unwrap(), None);
        assert_eq!(Option::<i32>::from_value(&Value::Int32(3)).unwrap(), Some(3));
        assert_eq!(
            i32::from_value(&Value::Null).unwrap_err(),
            DecodeError::Conversion("unexpected NULL".into())
        );
    }

    #[test]
    fn value_is_cloned() {
        let value = Value::from(vec![1i8, 2]);
        assert_eq!(Value::from_value(&value).unwrap(), value);
        assert_eq!(Value::from_value(&Value::Null).unwrap(), Value::Null);
    }
}
