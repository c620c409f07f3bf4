use std::{fmt::Display, str::FromStr};

use crate::{Cursor, Kind, Value, decoder::Decoder, error::DecodeError};

fn malformed(text: String, reason: impl Display) -> DecodeError {
    DecodeError::Number {
        reason: reason.to_string(),
        text,
    }
}

fn parse<T>(text: String) -> Result<T, DecodeError>
where
    T: FromStr,
    T::Err: Display,
{
    match text.parse() {
        Ok(v) => Ok(v),
        Err(e) => Err(malformed(text, e)),
    }
}

/// Integer column types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntType {
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
}

/// Decodes integer columns.
///
/// By default the token goes through an `f64` before being narrowed, with
/// fractions truncated and out-of-range values saturated. 64-bit values
/// above 2^53 therefore lose precision. This matches how the textual format
/// has always been read; [`IntDecoder::exact`] parses the token directly.
#[derive(Debug, Clone)]
pub struct IntDecoder {
    ty: IntType,
    exact: bool,
}

impl IntDecoder {
    pub fn new(ty: IntType) -> Self {
        Self { ty, exact: false }
    }

    pub fn exact(ty: IntType) -> Self {
        Self { ty, exact: true }
    }

    fn narrow(&self, v: f64) -> Value {
        match self.ty {
            IntType::Int8 => Value::Int8(v as i8),
            IntType::Int16 => Value::Int16(v as i16),
            IntType::Int32 => Value::Int32(v as i32),
            IntType::Int64 => Value::Int64(v as i64),
            IntType::UInt8 => Value::UInt8(v as u8),
            IntType::UInt16 => Value::UInt16(v as u16),
            IntType::UInt32 => Value::UInt32(v as u32),
            IntType::UInt64 => Value::UInt64(v as u64),
        }
    }

    fn parse_exact(&self, text: String) -> Result<Value, DecodeError> {
        Ok(match self.ty {
            IntType::Int8 => Value::Int8(parse(text)?),
            IntType::Int16 => Value::Int16(parse(text)?),
            IntType::Int32 => Value::Int32(parse(text)?),
            IntType::Int64 => Value::Int64(parse(text)?),
            IntType::UInt8 => Value::UInt8(parse(text)?),
            IntType::UInt16 => Value::UInt16(parse(text)?),
            IntType::UInt32 => Value::UInt32(parse(text)?),
            IntType::UInt64 => Value::UInt64(parse(text)?),
        })
    }
}

impl Decoder for IntDecoder {
    fn decode(&self, cursor: &mut Cursor<'_>) -> Result<Value, DecodeError> {
        let text = cursor.read_token();
        if self.exact {
            self.parse_exact(text)
        } else {
            parse::<f64>(text).map(|v| self.narrow(v))
        }
    }

    fn kind(&self) -> Kind {
        match self.ty {
            IntType::Int8 => Kind::Int8,
            IntType::Int16 => Kind::Int16,
            IntType::Int32 => Kind::Int32,
            IntType::Int64 => Kind::Int64,
            IntType::UInt8 => Kind::UInt8,
            IntType::UInt16 => Kind::UInt16,
            IntType::UInt32 => Kind::UInt32,
            IntType::UInt64 => Kind::UInt64,
        }
    }
}

/// Decodes `Float32` and `Float64` columns.
#[derive(Debug, Clone)]
pub struct FloatDecoder {
    double: bool,
}

impl FloatDecoder {
    pub fn float32() -> Self {
        Self { double: false }
    }

    pub fn float64() -> Self {
        Self { double: true }
    }
}

impl Decoder for FloatDecoder {
    fn decode(&self, cursor: &mut Cursor<'_>) -> Result<Value, DecodeError> {
        let text = cursor.read_token();
        if self.double {
            parse(text).map(Value::Float64)
        } else {
            parse(text).map(Value::Float32)
        }
    }

    fn kind(&self) -> Kind {
        if self.double {
            Kind::Float64
        } else {
            Kind::Float32
        }
    }
}
