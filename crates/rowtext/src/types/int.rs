use crate::{FromValue, Value, error::DecodeError};

impl<'r> FromValue<'r> for i8 {
    fn from_value(value: &'r Value) -> std::result::Result<Self, DecodeError> {
        super::integer(value)?;
        Ok(value.int64()?.try_into()?)
    }
}

impl<'r> FromValue<'r> for i16 {
    fn from_value(value: &'r Value) -> std::result::Result<Self, DecodeError> {
        super::integer(value)?;
        Ok(value.int64()?.try_into()?)
    }
}

impl<'r> FromValue<'r> for i32 {
    fn from_value(value: &'r Value) -> std::result::Result<Self, DecodeError> {
        super::integer(value)?;
        Ok(value.int64()?.try_into()?)
    }
}

impl<'r> FromValue<'r> for i64 {
    fn from_value(value: &'r Value) -> std::result::Result<Self, DecodeError> {
        super::integer(value)?;
        value.int64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widening_and_narrowing() {
        assert_eq!(i64::from_value(&Value::Int8(-3)).unwrap(), -3);
        assert_eq!(i16::from_value(&Value::UInt8(200)).unwrap(), 200);
        assert_eq!(i8::from_value(&Value::Int64(-128)).unwrap(), -128);
        assert!(matches!(
            i8::from_value(&Value::Int32(300)),
            Err(DecodeError::Conversion(_))
        ));
        assert!(i64::from_value(&Value::UInt64(u64::MAX)).is_err());
    }

    #[test]
    fn rejects_other_kinds() {
        assert_eq!(
            i32::from_value(&Value::Float64(1.0)).unwrap_err(),
            DecodeError::DataType {
                expected: "integer",
                found: "Float64"
            }
        );
        assert!(matches!(
            i32::from_value(&Value::from("1")),
            Err(DecodeError::DataType { found: "String", .. })
        ));
    }
}
