use crate::{Cursor, Kind, Value, decoder::Decoder, error::DecodeError};

/// Parse the boolean literals accepted on the wire.
pub(crate) fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

#[derive(Debug, Clone, Default)]
pub struct BoolDecoder {
    length: usize,
}

impl BoolDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read exactly `length` characters instead of scanning to a delimiter.
    pub fn fixed(length: usize) -> Self {
        Self { length }
    }
}

impl Decoder for BoolDecoder {
    fn decode(&self, cursor: &mut Cursor<'_>) -> Result<Value, DecodeError> {
        let token = if self.length == 0 {
            cursor.read_token()
        } else {
            let token: String = std::iter::from_fn(|| cursor.read())
                .take(self.length)
                .collect();
            let found = token.chars().count();
            if found != self.length {
                return Err(DecodeError::Length {
                    found,
                    expected: self.length,
                });
            }
            token
        };
        parse_bool(&token)
            .map(Value::Bool)
            .ok_or(DecodeError::Boolean(token))
    }

    fn kind(&self) -> Kind {
        Kind::Bool
    }
}
