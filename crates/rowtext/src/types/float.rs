use std::result::Result as StdResult;

use crate::{FromValue, Value, error::DecodeError};

impl<'r> FromValue<'r> for f32 {
    fn from_value(value: &'r Value) -> StdResult<Self, DecodeError> {
        match value {
            Value::Float32(v) => Ok(*v),
            _ => Ok(f64::from_value(value)? as Self),
        }
    }
}

impl<'r> FromValue<'r> for f64 {
    fn from_value(value: &'r Value) -> StdResult<Self, DecodeError> {
        compatible!(
            value,
            "number",
            Value::Float32(_)
                | Value::Float64(_)
                | Value::Int8(_)
                | Value::Int16(_)
                | Value::Int32(_)
                | Value::Int64(_)
                | Value::UInt8(_)
                | Value::UInt16(_)
                | Value::UInt32(_)
                | Value::UInt64(_)
        );
        value.double()
    }
}
