use crate::{
    Cursor, Kind, Value,
    decoder::{BoxDecoder, Decoder},
    error::DecodeError,
};

/// Decodes `Array(T)` values such as `[1,2,3]`.
#[derive(Debug)]
pub struct ArrayDecoder {
    element: BoxDecoder,
}

impl ArrayDecoder {
    pub fn new(element: BoxDecoder) -> Self {
        Self { element }
    }
}

impl Decoder for ArrayDecoder {
    fn decode(&self, cursor: &mut Cursor<'_>) -> Result<Value, DecodeError> {
        cursor.expect('[', "at the beginning of array")?;

        let mut items = Vec::new();
        if cursor.peek() == Some(']') {
            cursor.read();
            return Ok(Value::Array(items));
        }

        loop {
            let position = cursor.position();
            let item = self
                .element
                .decode(cursor)
                .map_err(DecodeError::nested("array element"))?;
            if item.is_null() && !self.element.is_nullable() {
                return Err(DecodeError::UnexpectedNull { position });
            }
            items.push(item);

            match cursor.read() {
                Some(',') => continue,
                Some(']') => break,
                found => return Err(cursor.unexpected(found, ']', "at the end of array")),
            }
        }

        Ok(Value::Array(items))
    }

    fn kind(&self) -> Kind {
        Kind::Array(Box::new(self.element.kind()))
    }
}
