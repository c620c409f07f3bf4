use time::{Date, PrimitiveDateTime, Time, macros::format_description as fd};

use crate::{
    Cursor, Kind, Location, Value, ZERO_TIMESTAMP,
    decoder::Decoder,
    error::DecodeError,
};

const QUOTE: char = '\'';
const ZERO_DATE: &str = "0000-00-00";
const MAX_FRACTION_DIGITS: usize = 9;

/// The textual layout of a date or time column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTimeFormat {
    /// `YYYY-MM-DD`
    Date,
    /// `YYYY-MM-DD hh:mm:ss`, optionally followed by a fraction.
    DateTime,
}

impl DateTimeFormat {
    fn width(self) -> usize {
        match self {
            DateTimeFormat::Date => 10,
            DateTimeFormat::DateTime => 19,
        }
    }
}

/// Decodes `Date`, `DateTime`, `DateTime64` and `Timestamp` columns.
#[derive(Debug, Clone)]
pub struct DateTimeDecoder {
    quoted: bool,
    format: DateTimeFormat,
    precision: usize,
    location: Location,
}

impl DateTimeDecoder {
    pub fn new(format: DateTimeFormat, precision: usize, location: Location, quoted: bool) -> Self {
        Self {
            quoted,
            format,
            precision,
            location,
        }
    }

    /// Number of characters in a value rendered at this precision.
    fn width(&self) -> usize {
        match self.precision {
            0 => self.format.width(),
            p => self.format.width() + 1 + p,
        }
    }

    fn is_end(&self, c: char) -> bool {
        if self.quoted {
            c == QUOTE
        } else {
            matches!(c, ',' | ']' | ')' | '}')
        }
    }

    fn read(&self, cursor: &mut Cursor<'_>) -> String {
        let width = self.width();
        let mut text = String::with_capacity(width);
        let mut count = 0;
        while count < width {
            match cursor.read() {
                Some(c) if self.is_end(c) => {
                    cursor.unread(c);
                    break;
                }
                Some(c) => {
                    text.push(c);
                    count += 1;
                }
                None => break,
            }
        }
        // The server may render more fraction digits than the declared precision.
        if self.precision > 0 && count == width {
            while let Some(c) = cursor.read() {
                if !c.is_ascii_digit() {
                    cursor.unread(c);
                    break;
                }
                text.push(c);
            }
        }
        text
    }

    fn parse(&self, text: &str) -> Result<PrimitiveDateTime, time::error::Parse> {
        let with_fraction = fd!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]");
        match self.format {
            DateTimeFormat::Date => Date::parse(text, &fd!("[year]-[month]-[day]"))
                .map(|date| PrimitiveDateTime::new(date, Time::MIDNIGHT)),
            DateTimeFormat::DateTime => match text.split_once('.') {
                Some((whole, fraction)) => match fraction.char_indices().nth(MAX_FRACTION_DIGITS) {
                    Some((cut, _)) => {
                        let text = format!("{whole}.{}", &fraction[..cut]);
                        PrimitiveDateTime::parse(&text, &with_fraction)
                    }
                    None => PrimitiveDateTime::parse(text, &with_fraction),
                },
                None => PrimitiveDateTime::parse(
                    text,
                    &fd!("[year]-[month]-[day] [hour]:[minute]:[second]"),
                ),
            },
        }
    }
}

impl Decoder for DateTimeDecoder {
    fn decode(&self, cursor: &mut Cursor<'_>) -> Result<Value, DecodeError> {
        if self.quoted {
            cursor.expect(QUOTE, "instead of an opening quote")?;
        }
        let text = self.read(cursor);
        if self.quoted {
            cursor.expect(QUOTE, "instead of a closing quote")?;
        }

        let date = text.split_once(' ').map_or(text.as_str(), |(date, _)| date);
        if date == ZERO_DATE {
            return Ok(Value::Timestamp(ZERO_TIMESTAMP));
        }

        match self.parse(&text) {
            Ok(local) => Ok(Value::Timestamp(self.location.resolve(local))),
            Err(e) => Err(DecodeError::DateTime {
                reason: e.to_string(),
                text,
            }),
        }
    }

    fn kind(&self) -> Kind {
        Kind::Timestamp
    }
}
