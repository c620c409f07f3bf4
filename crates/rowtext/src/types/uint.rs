use crate::{FromValue, Value, error::DecodeError};

impl<'r> FromValue<'r> for u8 {
    fn from_value(value: &'r Value) -> std::result::Result<Self, DecodeError> {
        super::integer(value)?;
        Ok(value.uint64()?.try_into()?)
    }
}

impl<'r> FromValue<'r> for u16 {
    fn from_value(value: &'r Value) -> std::result::Result<Self, DecodeError> {
        super::integer(value)?;
        Ok(value.uint64()?.try_into()?)
    }
}

impl<'r> FromValue<'r> for u32 {
    fn from_value(value: &'r Value) -> std::result::Result<Self, DecodeError> {
        super::integer(value)?;
        Ok(value.uint64()?.try_into()?)
    }
}

impl<'r> FromValue<'r> for u64 {
    fn from_value(value: &'r Value) -> std::result::Result<Self, DecodeError> {
        super::integer(value)?;
        value.uint64()
    }
}
