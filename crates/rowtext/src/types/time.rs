use crate::{FromValue, Value, error::DecodeError};
pub use time::{Date, OffsetDateTime, PrimitiveDateTime};

fn timestamp(value: &Value) -> std::result::Result<OffsetDateTime, DecodeError> {
    compatible!(value, "Timestamp", Value::Timestamp(_));
    match value {
        Value::Timestamp(ts) => Ok(*ts),
        _ => Err(format!("invalid timestamp: {value:?}").into()),
    }
}

impl<'r> FromValue<'r> for OffsetDateTime {
    fn from_value(value: &'r Value) -> std::result::Result<Self, DecodeError> {
        timestamp(value)
    }
}

/// The wall-clock reading in the timestamp's own offset.
impl<'r> FromValue<'r> for PrimitiveDateTime {
    fn from_value(value: &'r Value) -> std::result::Result<Self, DecodeError> {
        let ts = timestamp(value)?;
        Ok(PrimitiveDateTime::new(ts.date(), ts.time()))
    }
}

impl<'r> FromValue<'r> for Date {
    fn from_value(value: &'r Value) -> std::result::Result<Self, DecodeError> {
        timestamp(value).map(|ts| ts.date())
    }
}
