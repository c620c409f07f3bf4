use crate::{
    Cursor, Kind, Value,
    decoder::{BoxDecoder, Decoder},
    error::DecodeError,
};

/// Decodes `Tuple(T1, ..., Tn)` values such as `(1,'a')`.
#[derive(Debug)]
pub struct TupleDecoder {
    elements: Vec<BoxDecoder>,
}

impl TupleDecoder {
    pub fn new(elements: Vec<BoxDecoder>) -> Self {
        Self { elements }
    }
}

impl Decoder for TupleDecoder {
    fn decode(&self, cursor: &mut Cursor<'_>) -> Result<Value, DecodeError> {
        cursor.expect('(', "at the beginning of tuple")?;

        let mut fields = Vec::with_capacity(self.elements.len());
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                cursor.expect(',', "between tuple elements")?;
            }
            let field = element
                .decode(cursor)
                .map_err(DecodeError::nested("tuple element"))?;
            fields.push(field);
        }

        cursor.expect(')', "at the end of tuple")?;
        Ok(Value::Tuple(fields))
    }

    fn kind(&self) -> Kind {
        Kind::Tuple(self.elements.iter().map(|e| e.kind()).collect())
    }
}
