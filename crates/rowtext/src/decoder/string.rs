use crate::{
    Cursor, Kind, Value,
    decoder::{Decoder, nullable::skip_null_marker},
    error::DecodeError,
};

const QUOTE: char = '\'';

fn escape_error(cursor: &Cursor<'_>, reason: &str) -> DecodeError {
    DecodeError::Escape {
        position: cursor.position(),
        reason: reason.into(),
    }
}

/// Decode the character following a backslash.
fn read_escaped(cursor: &mut Cursor<'_>) -> Result<char, DecodeError> {
    let Some(c) = cursor.read() else {
        return Err(escape_error(cursor, "unexpected end of input after escape"));
    };
    Ok(match c {
        'b' => '\u{8}',
        'f' => '\u{c}',
        'r' => '\r',
        'n' => '\n',
        't' => '\t',
        '0' => '\0',
        'a' => '\u{7}',
        'v' => '\u{b}',
        'x' => {
            let mut code = 0u32;
            for _ in 0..2 {
                let Some(digit) = cursor.read().and_then(|d| d.to_digit(16)) else {
                    return Err(escape_error(cursor, "malformed \\x escape"));
                };
                code = code * 16 + digit;
            }
            // two hex digits are always a valid scalar value
            char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)
        }
        other => other,
    })
}

/// Text read from the stream, and whether it was exactly the escaped NULL
/// marker `\N`.
struct Text {
    value: String,
    escaped_null: bool,
}

/// Read `length` characters, or with `length == 0` up to the closing quote
/// (quoted) or end of input (unquoted).
fn read_text(cursor: &mut Cursor<'_>, length: usize, quoted: bool) -> Result<Text, DecodeError> {
    let mut value = String::new();
    let mut count = 0;
    let mut escaped_null = false;

    while length == 0 || count < length {
        let c = match cursor.read() {
            None => break,
            Some(QUOTE) if quoted => {
                cursor.unread(QUOTE);
                break;
            }
            Some('\\') => {
                let escaped = read_escaped(cursor)?;
                escaped_null = count == 0 && escaped == 'N';
                escaped
            }
            Some(c) => c,
        };
        value.push(c);
        count += 1;
    }

    if length != 0 && count != length {
        return Err(DecodeError::Length {
            found: count,
            expected: length,
        });
    }

    Ok(Text {
        value,
        escaped_null: escaped_null && count == 1,
    })
}

/// Decodes text columns, and any type carried as opaque text.
///
/// Inside composites strings are single-quoted; top-level cells are not.
/// In null-check mode, used for `Nullable(String)`, the escaped marker `\N`
/// decodes to NULL; otherwise it is the ordinary text `N`.
#[derive(Debug, Clone, Default)]
pub struct StringDecoder {
    quoted: bool,
    length: usize,
    null_check: bool,
}

impl StringDecoder {
    pub fn new(quoted: bool) -> Self {
        Self {
            quoted,
            ..Self::default()
        }
    }

    /// A `FixedString(length)` decoder.
    pub fn fixed(quoted: bool, length: usize) -> Self {
        Self {
            quoted,
            length,
            null_check: false,
        }
    }

    /// Recognize NULL markers in the text itself.
    #[must_use]
    pub fn null_check(mut self) -> Self {
        self.null_check = true;
        self
    }
}

impl Decoder for StringDecoder {
    fn decode(&self, cursor: &mut Cursor<'_>) -> Result<Value, DecodeError> {
        if self.quoted {
            if self.null_check && cursor.peek() != Some(QUOTE) && skip_null_marker(cursor) {
                return Ok(Value::Null);
            }
            cursor.expect(QUOTE, "instead of an opening quote")?;
        }

        let text = read_text(cursor, self.length, self.quoted)?;

        if self.quoted {
            cursor.expect(QUOTE, "instead of a closing quote")?;
        }

        if self.null_check && text.escaped_null {
            Ok(Value::Null)
        } else {
            Ok(Value::String(text.value))
        }
    }

    fn is_nullable(&self) -> bool {
        self.null_check
    }

    fn kind(&self) -> Kind {
        Kind::String
    }
}
