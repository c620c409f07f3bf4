use indexmap::IndexMap;

use crate::{
    Cursor, Kind, Value,
    decoder::{BoxDecoder, Decoder},
    error::DecodeError,
};

/// Decodes `Map(K, V)` values such as `{'a':1,'b':2}`.
///
/// Entries keep their wire order. A repeated key keeps its first position
/// and takes the last value.
#[derive(Debug)]
pub struct MapDecoder {
    key: BoxDecoder,
    value: BoxDecoder,
}

impl MapDecoder {
    pub fn new(key: BoxDecoder, value: BoxDecoder) -> Self {
        Self { key, value }
    }
}

impl Decoder for MapDecoder {
    fn decode(&self, cursor: &mut Cursor<'_>) -> Result<Value, DecodeError> {
        cursor.expect('{', "at the beginning of map")?;

        let mut entries = IndexMap::new();
        if cursor.peek() == Some('}') {
            cursor.read();
            return Ok(Value::Map(entries));
        }

        loop {
            let key = self
                .key
                .decode(cursor)
                .map_err(DecodeError::nested("map key"))?;
            cursor.expect(':', "between map key and value")?;
            let value = self
                .value
                .decode(cursor)
                .map_err(DecodeError::nested("map value"))?;
            entries.insert(key, value);

            match cursor.read() {
                Some(',') => continue,
                Some('}') => break,
                found => return Err(cursor.unexpected(found, '}', "at the end of map")),
            }
        }

        Ok(Value::Map(entries))
    }

    fn kind(&self) -> Kind {
        Kind::Map(Box::new(self.key.kind()), Box::new(self.value.kind()))
    }
}
