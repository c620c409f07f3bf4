use atoi::FromRadix10Checked;

use crate::{
    DecodeOptions, Location, TypeDesc,
    decoder::{
        ArrayDecoder, BoolDecoder, BoxDecoder, DateTimeDecoder, DateTimeFormat, FloatDecoder,
        IntDecoder, IntType, MapDecoder, NothingDecoder, NullableDecoder, StringDecoder,
        TupleDecoder,
    },
    error::BuildError,
};

const MAX_PRECISION: usize = 9;

/// Compile a decoder for `desc`.
///
/// `quote_strings` selects the quoted string syntax used inside composites.
/// Children of composites are always compiled quoted.
pub fn compile(
    desc: &TypeDesc,
    quote_strings: bool,
    options: &DecodeOptions,
) -> Result<BoxDecoder, BuildError> {
    let decoder = if desc.nullable {
        nullable(desc, quote_strings, options)?
    } else {
        build(desc, quote_strings, options, false)?
    };
    tracing::trace!(
        target: "rowtext::compile",
        ty = %desc,
        kind = %decoder.kind(),
        quoted = quote_strings,
        "compiled decoder"
    );
    Ok(decoder)
}

/// Compile the decoder for a top-level result cell, which is never quoted.
pub fn column_decoder(desc: &TypeDesc, options: &DecodeOptions) -> Result<BoxDecoder, BuildError> {
    compile(desc, false, options)
}

/// Wrap the decoder for `inner` in a single nullability wrapper, whatever
/// mix of flag and `Nullable(...)` forms it is declared with.
fn nullable(
    inner: &TypeDesc,
    quote_strings: bool,
    options: &DecodeOptions,
) -> Result<BoxDecoder, BuildError> {
    match inner.name.as_str() {
        "Nullable" => nullable(nullable_arg(inner)?, quote_strings, options),
        "NULL" => build(inner, quote_strings, options, true),
        name => {
            let decoder = build(inner, quote_strings, options, true)?;
            Ok(Box::new(NullableDecoder::new(decoder, name)))
        }
    }
}

fn nullable_arg(desc: &TypeDesc) -> Result<&TypeDesc, BuildError> {
    match desc.args.as_slice() {
        [arg] => Ok(arg),
        [] => Err(BuildError::MissingArgument {
            type_name: "Nullable",
            what: "inner type",
        }),
        args => Err(BuildError::Arity {
            type_name: "Nullable",
            expected: "1",
            found: args.len(),
        }),
    }
}

/// Dispatch on the type name, ignoring the descriptor's nullable flag.
///
/// `null_check` is set when the result will be wrapped for nullability, so
/// that strings can recognize the escaped NULL marker themselves.
fn build(
    desc: &TypeDesc,
    quote: bool,
    options: &DecodeOptions,
    null_check: bool,
) -> Result<BoxDecoder, BuildError> {
    let int = |ty| -> BoxDecoder {
        if options.exact_integers {
            Box::new(IntDecoder::exact(ty))
        } else {
            Box::new(IntDecoder::new(ty))
        }
    };

    let decoder: BoxDecoder = match desc.name.as_str() {
        "Nothing" => Box::new(NothingDecoder),
        "Nullable" => nullable(nullable_arg(desc)?, quote, options)?,
        "NULL" => Box::new(NullableDecoder::new(
            Box::new(StringDecoder::new(quote).null_check()),
            "String",
        )),

        "Date" => Box::new(DateTimeDecoder::new(
            DateTimeFormat::Date,
            0,
            default_location(options),
            quote,
        )),
        "DateTime" => Box::new(DateTimeDecoder::new(
            DateTimeFormat::DateTime,
            0,
            location(desc.args.first(), options)?,
            quote,
        )),
        "DateTime64" => {
            let Some(tick) = desc.args.first() else {
                return Err(BuildError::MissingArgument {
                    type_name: "DateTime64",
                    what: "tick size",
                });
            };
            let precision = literal_usize(tick).filter(|p| *p <= MAX_PRECISION).ok_or_else(|| {
                BuildError::MalformedArgument {
                    type_name: "DateTime64",
                    what: "tick size",
                    value: tick.name.clone(),
                }
            })?;
            Box::new(DateTimeDecoder::new(
                DateTimeFormat::DateTime,
                precision,
                location(desc.args.get(1), options)?,
                quote,
            ))
        }
        "Timestamp" => Box::new(DateTimeDecoder::new(
            DateTimeFormat::DateTime,
            1,
            default_location(options),
            quote,
        )),

        "Boolean" => Box::new(BoolDecoder::new()),
        "UInt8" => int(IntType::UInt8),
        "UInt16" => int(IntType::UInt16),
        "UInt32" => int(IntType::UInt32),
        "UInt64" => int(IntType::UInt64),
        "Int8" => int(IntType::Int8),
        "Int16" => int(IntType::Int16),
        "Int32" => int(IntType::Int32),
        "Int64" => int(IntType::Int64),
        "Float32" => Box::new(FloatDecoder::float32()),
        "Float64" => Box::new(FloatDecoder::float64()),

        "String" if null_check => Box::new(StringDecoder::new(quote).null_check()),
        "Decimal" | "String" | "Enum8" | "Enum16" | "Bitmap" | "UUID" | "IPv4" | "IPv6"
        | "Variant" | "VariantObject" => Box::new(StringDecoder::new(quote)),
        "FixedString" => {
            let [length] = desc.args.as_slice() else {
                return Err(BuildError::MissingArgument {
                    type_name: "FixedString",
                    what: "length",
                });
            };
            let n = literal_usize(length).ok_or_else(|| BuildError::MalformedArgument {
                type_name: "FixedString",
                what: "length",
                value: length.name.clone(),
            })?;
            Box::new(StringDecoder::fixed(quote, n))
        }

        "Array" => {
            let [element] = desc.args.as_slice() else {
                return Err(BuildError::Arity {
                    type_name: "Array",
                    expected: "1",
                    found: desc.args.len(),
                });
            };
            let element =
                compile(element, true, options).map_err(BuildError::nested("array elements"))?;
            Box::new(ArrayDecoder::new(element))
        }
        "Tuple" => {
            if desc.args.is_empty() {
                return Err(BuildError::MissingArgument {
                    type_name: "Tuple",
                    what: "element types",
                });
            }
            let elements = desc
                .args
                .iter()
                .map(|arg| compile(arg, true, options))
                .collect::<Result<Vec<_>, _>>()
                .map_err(BuildError::nested("tuple element"))?;
            Box::new(TupleDecoder::new(elements))
        }
        "Map" => {
            let [key, value] = desc.args.as_slice() else {
                return Err(BuildError::Arity {
                    type_name: "Map",
                    expected: "2",
                    found: desc.args.len(),
                });
            };
            let key = compile(key, true, options).map_err(BuildError::nested("map keys"))?;
            let value = compile(value, true, options).map_err(BuildError::nested("map values"))?;
            Box::new(MapDecoder::new(key, value))
        }

        other => return Err(BuildError::Unsupported(other.into())),
    };
    Ok(decoder)
}

/// Parse a whole literal argument as a non-negative integer.
fn literal_usize(arg: &TypeDesc) -> Option<usize> {
    let text = arg.name.trim();
    match usize::from_radix_10_checked(text.as_bytes()) {
        (Some(n), used) if used == text.len() && used > 0 => Some(n),
        _ => None,
    }
}

fn default_location(options: &DecodeOptions) -> Location {
    options.default_location.unwrap_or(Location::Utc)
}

/// The column's own time zone wins when no default is configured, or when
/// the options ask for it explicitly.
fn location(tz: Option<&TypeDesc>, options: &DecodeOptions) -> Result<Location, BuildError> {
    match tz {
        Some(tz) if options.default_location.is_none() || options.prefer_db_location => {
            Location::named(tz.name.trim_matches('\''))
        }
        _ => Ok(default_location(options)),
    }
}

#[cfg(test)]
mod tests {
    use time::macros::{datetime, offset};

    use super::*;
    use crate::{Cursor, Kind, Value};

    fn decode(desc: &TypeDesc, options: &DecodeOptions, text: &str) -> Value {
        let decoder = column_decoder(desc, options).unwrap();
        decoder.decode(&mut Cursor::new(text)).unwrap()
    }

    #[test]
    fn dispatch_kinds() {
        let options = DecodeOptions::default();
        for (name, kind) in [
            ("Boolean", Kind::Bool),
            ("UInt8", Kind::UInt8),
            ("Int64", Kind::Int64),
            ("Float32", Kind::Float32),
            ("Decimal", Kind::String),
            ("UUID", Kind::String),
            ("VariantObject", Kind::String),
            ("Date", Kind::Timestamp),
            ("DateTime", Kind::Timestamp),
            ("Timestamp", Kind::Timestamp),
            ("Nothing", Kind::Null),
            ("NULL", Kind::String),
        ] {
            let decoder = column_decoder(&TypeDesc::new(name), &options).unwrap();
            assert_eq!(decoder.kind(), kind, "{name}");
        }
    }

    #[test]
    fn unsupported() {
        let err = column_decoder(&TypeDesc::new("Geometry"), &DecodeOptions::default())
            .unwrap_err();
        assert_eq!(err, BuildError::Unsupported("Geometry".into()));
        assert_eq!(err.to_string(), "type Geometry is not supported");
    }

    #[test]
    fn nested_failures_carry_context() {
        let desc = TypeDesc::array(TypeDesc::new("Geometry"));
        let err = column_decoder(&desc, &DecodeOptions::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to create decoder for array elements: type Geometry is not supported"
        );

        let desc = TypeDesc::map(TypeDesc::new("String"), TypeDesc::new("Bogus"));
        let err = column_decoder(&desc, &DecodeOptions::default()).unwrap_err();
        assert!(matches!(err, BuildError::Nested { context: "map values", .. }));
    }

    #[test]
    fn arity() {
        let options = DecodeOptions::default();
        let err = column_decoder(&TypeDesc::new("Array"), &options).unwrap_err();
        assert!(matches!(err, BuildError::Arity { type_name: "Array", found: 0, .. }));
        let err = column_decoder(&TypeDesc::with_args("Map", [TypeDesc::new("String")]), &options)
            .unwrap_err();
        assert!(matches!(err, BuildError::Arity { type_name: "Map", found: 1, .. }));
        let err = column_decoder(&TypeDesc::new("Tuple"), &options).unwrap_err();
        assert!(matches!(err, BuildError::MissingArgument { type_name: "Tuple", .. }));
        let err = column_decoder(&TypeDesc::new("Nullable"), &options).unwrap_err();
        assert!(matches!(err, BuildError::MissingArgument { type_name: "Nullable", .. }));
    }

    #[test]
    fn fixed_string_length() {
        let options = DecodeOptions::default();
        let desc = TypeDesc::with_args("FixedString", [TypeDesc::literal(3)]);
        assert_eq!(decode(&desc, &options, "abc"), Value::from("abc"));

        for bad in ["", "x", "-3", "3x"] {
            let desc = TypeDesc::with_args("FixedString", [TypeDesc::literal(bad)]);
            assert!(
                matches!(
                    column_decoder(&desc, &options),
                    Err(BuildError::MalformedArgument { .. })
                ),
                "{bad:?}"
            );
        }
        assert!(matches!(
            column_decoder(&TypeDesc::new("FixedString"), &options),
            Err(BuildError::MissingArgument { .. })
        ));
    }

    #[test]
    fn datetime64_precision() {
        let options = DecodeOptions::default();
        assert!(matches!(
            column_decoder(&TypeDesc::new("DateTime64"), &options),
            Err(BuildError::MissingArgument { type_name: "DateTime64", .. })
        ));
        for bad in ["-1", "10", "three"] {
            let desc = TypeDesc::with_args("DateTime64", [TypeDesc::literal(bad)]);
            assert!(
                matches!(
                    column_decoder(&desc, &options),
                    Err(BuildError::MalformedArgument { .. })
                ),
                "{bad:?}"
            );
        }
        let desc = TypeDesc::with_args("DateTime64", [TypeDesc::literal(3)]);
        assert_eq!(
            decode(&desc, &options, "2023-04-05 06:07:08.250"),
            Value::Timestamp(datetime!(2023-04-05 6:07:08.25 UTC))
        );
    }

    #[test]
    fn time_zone_precedence() {
        let desc = TypeDesc::with_args("DateTime", [TypeDesc::literal("Asia/Shanghai")]);
        let text = "2023-04-05 06:07:08";

        // column zone when no default is configured
        assert_eq!(
            decode(&desc, &DecodeOptions::default(), text),
            Value::Timestamp(datetime!(2023-04-05 6:07:08 +8))
        );

        // configured default overrides it
        let options = DecodeOptions::new().default_location(Location::Fixed(offset!(-5)));
        assert_eq!(
            decode(&desc, &options, text),
            Value::Timestamp(datetime!(2023-04-05 6:07:08 -5))
        );

        // unless the column zone is preferred
        let options = options.prefer_db_location(true);
        assert_eq!(
            decode(&desc, &options, text),
            Value::Timestamp(datetime!(2023-04-05 6:07:08 +8))
        );

        // Date ignores time zone arguments
        let date = TypeDesc::with_args("Date", [TypeDesc::literal("Asia/Shanghai")]);
        assert_eq!(
            decode(&date, &DecodeOptions::default(), "2023-04-05"),
            Value::Timestamp(datetime!(2023-04-05 0:00 UTC))
        );

        let desc = TypeDesc::with_args("DateTime", [TypeDesc::literal("Nowhere/Special")]);
        assert_eq!(
            column_decoder(&desc, &DecodeOptions::default()).unwrap_err(),
            BuildError::UnknownTimezone("Nowhere/Special".into())
        );
    }

    #[test]
    fn nullable_wrapped_once() {
        let options = DecodeOptions::default();
        let flagged = TypeDesc::nullable_of(TypeDesc::new("Int32").nullable());
        let decoder = column_decoder(&flagged, &options).unwrap();
        assert!(decoder.is_nullable());
        assert_eq!(decoder.decode(&mut Cursor::new("NULL")).unwrap(), Value::Null);
        assert_eq!(decoder.decode(&mut Cursor::new("4")).unwrap(), Value::Int32(4));
        assert!(format!("{decoder:?}").matches("NullableDecoder").count() == 1);

        let doubled = TypeDesc::nullable_of(TypeDesc::nullable_of(TypeDesc::new("Int32")));
        let decoder = column_decoder(&doubled, &options).unwrap();
        assert!(format!("{decoder:?}").matches("NullableDecoder").count() == 1);
    }

    #[test]
    fn nullable_strings_check_escaped_marker() {
        let options = DecodeOptions::default();
        let desc = TypeDesc::new("String").nullable();
        assert_eq!(decode(&desc, &options, "\\N"), Value::Null);
        assert_eq!(decode(&desc, &options, "NULL"), Value::from("NULL"));

        let plain = TypeDesc::new("String");
        assert_eq!(decode(&plain, &options, "\\N"), Value::from("N"));

        let legacy = TypeDesc::new("NULL");
        assert_eq!(decode(&legacy, &options, "\\N"), Value::Null);
    }

    #[test]
    fn exact_integers_option() {
        let desc = TypeDesc::new("Int64");
        let text = "9007199254740993";
        assert_eq!(
            decode(&desc, &DecodeOptions::default(), text),
            Value::Int64(9007199254740992)
        );
        let options = DecodeOptions::new().exact_integers(true);
        assert_eq!(decode(&desc, &options, text), Value::Int64(9007199254740993));
    }
}
