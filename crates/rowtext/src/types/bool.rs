use crate::{FromValue, Value, error::DecodeError};

impl<'r> FromValue<'r> for bool {
    fn from_value(value: &'r Value) -> std::result::Result<bool, DecodeError> {
        compatible!(value, "Boolean", Value::Bool(_));
        Ok(matches!(value, Value::Bool(true)))
    }
}
