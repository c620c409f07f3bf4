use smallvec::SmallVec;

use crate::{
    Cursor, Kind, Value,
    cursor::{LOOKAHEAD, is_delimiter},
    decoder::{BoxDecoder, Decoder},
    error::DecodeError,
};

const NULL_LITERAL: [char; 4] = ['N', 'U', 'L', 'L'];
const ESCAPED_NULL: [char; 2] = ['\\', 'N'];

fn scan_null_marker(cursor: &mut Cursor<'_>, seen: &mut SmallVec<[char; LOOKAHEAD]>) -> bool {
    let marker: &[char] = match cursor.peek() {
        Some('N') => &NULL_LITERAL,
        Some('\\') => &ESCAPED_NULL,
        _ => return false,
    };
    for &expected in marker {
        match cursor.read() {
            Some(c) => {
                seen.push(c);
                if c != expected {
                    return false;
                }
            }
            None => return false,
        }
    }
    match cursor.peek() {
        None => true,
        Some(c) => is_delimiter(c),
    }
}

/// Consume an unquoted NULL marker (`NULL` or `\N`) that runs up to a
/// delimiter or the end of input.
///
/// On a mismatch every character read is pushed back, newest first, and the
/// cursor is left exactly where it started.
pub(crate) fn skip_null_marker(cursor: &mut Cursor<'_>) -> bool {
    let mut seen = SmallVec::new();
    let matched = scan_null_marker(cursor, &mut seen);
    if !matched {
        cursor.rewind(&mut seen);
    }
    matched
}

/// Intercepts NULL markers before an inner decoder runs.
///
/// String columns are handed straight to the inner decoder, which recognizes
/// the escaped `\N` marker itself: a bare `NULL` there is legitimate text.
#[derive(Debug)]
pub struct NullableDecoder {
    inner: BoxDecoder,
    inner_type: String,
}

impl NullableDecoder {
    pub fn new(inner: BoxDecoder, inner_type: impl Into<String>) -> Self {
        Self {
            inner,
            inner_type: inner_type.into(),
        }
    }

    pub fn inner_type(&self) -> &str {
        &self.inner_type
    }
}

impl Decoder for NullableDecoder {
    fn decode(&self, cursor: &mut Cursor<'_>) -> Result<Value, DecodeError> {
        if self.inner_type != "String" && skip_null_marker(cursor) {
            return Ok(Value::Null);
        }
        self.inner.decode(cursor)
    }

    fn is_nullable(&self) -> bool {
        true
    }

    fn kind(&self) -> Kind {
        self.inner.kind()
    }
}

/// Decodes the `Nothing` type, whose only value is NULL.
#[derive(Debug, Clone, Default)]
pub struct NothingDecoder;

impl Decoder for NothingDecoder {
    fn decode(&self, cursor: &mut Cursor<'_>) -> Result<Value, DecodeError> {
        skip_null_marker(cursor);
        Ok(Value::Null)
    }

    fn is_nullable(&self) -> bool {
        true
    }

    fn kind(&self) -> Kind {
        Kind::Null
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::{IntDecoder, IntType, StringDecoder};

    #[test]
    fn marker_requires_terminator() {
        for (text, matched, rest) in [
            ("NULL", true, ""),
            ("NULL,1", true, ",1"),
            ("NULL]", true, "]"),
            ("\\N", true, ""),
            ("\\N)", true, ")"),
            ("NULLX", false, "NULLX"),
            ("NUL", false, "NUL"),
            ("NUx,", false, "NUx,"),
            ("\\n", false, "\\n"),
            ("1", false, "1"),
            ("", false, ""),
        ] {
            let mut cursor = Cursor::new(text);
            assert_eq!(skip_null_marker(&mut cursor), matched, "{text:?}");
            assert_eq!(cursor.remaining(), rest, "{text:?}");
        }
    }

    #[test]
    fn mismatch_restores_position() {
        let mut cursor = Cursor::new("NULLS");
        assert!(!skip_null_marker(&mut cursor));
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.read(), Some('N'));
    }

    #[test]
    fn intercepts_markers_for_non_string_types() {
        let decoder = NullableDecoder::new(Box::new(IntDecoder::new(IntType::Int32)), "Int32");
        for text in ["NULL", "\\N"] {
            assert_eq!(decoder.decode(&mut Cursor::new(text)).unwrap(), Value::Null);
        }
        assert_eq!(
            decoder.decode(&mut Cursor::new("12")).unwrap(),
            Value::Int32(12)
        );
        assert!(decoder.is_nullable());
        assert_eq!(decoder.kind(), Kind::Int32);
    }

    #[test]
    fn delegates_strings() {
        let decoder = NullableDecoder::new(
            Box::new(StringDecoder::new(false).null_check()),
            "String",
        );
        assert_eq!(
            decoder.decode(&mut Cursor::new("NULL")).unwrap(),
            Value::from("NULL")
        );
        assert_eq!(decoder.decode(&mut Cursor::new("\\N")).unwrap(), Value::Null);
    }

    #[test]
    fn nothing_consumes_marker() {
        let mut cursor = Cursor::new("NULL,");
        assert_eq!(NothingDecoder.decode(&mut cursor).unwrap(), Value::Null);
        assert_eq!(cursor.remaining(), ",");
        assert!(NothingDecoder.is_nullable());
    }
}
