use crate::{FromValue, Value, error::DecodeError};

impl<'r> FromValue<'r> for &'r str {
    fn from_value(value: &'r Value) -> Result<Self, DecodeError> {
        compatible!(value, "String", Value::String(_));
        value.text()
    }
}

impl<'r> FromValue<'r> for String {
    fn from_value(value: &'r Value) -> Result<Self, DecodeError> {
        compatible!(value, "String", Value::String(_));
        value.text().map(ToOwned::to_owned)
    }
}
