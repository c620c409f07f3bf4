use rowtext::{Cursor, DecodeOptions, FromValue, TypeDesc, Value, compile};

pub use anyhow;
pub use paste;

/// Parse a type name such as `Map(String, Array(Nullable(Int32)))` into a
/// descriptor. Quoted literal arguments have their quotes removed.
pub fn parse_type(text: &str) -> anyhow::Result<TypeDesc> {
    let mut cursor = Cursor::new(text.trim());
    let desc = parse_desc(&mut cursor)?;
    anyhow::ensure!(
        cursor.is_eof(),
        "trailing input {:?} in type {text:?}",
        cursor.remaining()
    );
    Ok(desc)
}

fn parse_desc(cursor: &mut Cursor<'_>) -> anyhow::Result<TypeDesc> {
    while cursor.peek() == Some(' ') {
        cursor.read();
    }
    let mut name = String::new();
    if cursor.peek() == Some('\'') {
        cursor.read();
        loop {
            match cursor.read() {
                Some('\'') => break,
                Some(c) => name.push(c),
                None => anyhow::bail!("unterminated literal {name:?}"),
            }
        }
        return Ok(TypeDesc::literal(name));
    }
    while let Some(c) = cursor.peek() {
        if matches!(c, '(' | ')' | ',') {
            break;
        }
        cursor.read();
        name.push(c);
    }
    anyhow::ensure!(!name.is_empty(), "empty type name");

    let mut args = Vec::new();
    if cursor.peek() == Some('(') {
        cursor.read();
        loop {
            args.push(parse_desc(cursor)?);
            match cursor.read() {
                Some(',') => continue,
                Some(')') => break,
                other => anyhow::bail!("unexpected {other:?} in arguments of {name}"),
            }
        }
    }
    Ok(TypeDesc::with_args(name.trim_end(), args))
}

/// Shorthand for [`parse_type`] in tests, panicking on malformed names.
pub fn ty(text: &str) -> TypeDesc {
    match parse_type(text) {
        Ok(desc) => desc,
        Err(e) => panic!("malformed type name {text:?}: {e}"),
    }
}

/// Decode `text` as a top-level cell, returning the value and whatever input
/// the decoder left unconsumed.
pub fn decode(desc: &TypeDesc, text: &str) -> rowtext::Result<(Value, String)> {
    decode_with(desc, &DecodeOptions::default(), false, text)
}

/// Decode `text` as it would appear inside a composite, with strings quoted.
pub fn decode_quoted(desc: &TypeDesc, text: &str) -> rowtext::Result<(Value, String)> {
    decode_with(desc, &DecodeOptions::default(), true, text)
}

pub fn decode_with(
    desc: &TypeDesc,
    options: &DecodeOptions,
    quote_strings: bool,
    text: &str,
) -> rowtext::Result<(Value, String)> {
    let decoder = compile(desc, quote_strings, options)?;
    let mut cursor = Cursor::new(text);
    let value = decoder.decode(&mut cursor)?;
    Ok((value, cursor.remaining()))
}

/// Decode a whole top-level cell and extract it as `T`.
pub fn decode_as<T>(desc: &TypeDesc, text: &str) -> anyhow::Result<T>
where
    T: for<'r> FromValue<'r>,
{
    let (value, rest) = decode(desc, text)?;
    anyhow::ensure!(rest.is_empty(), "{text:?} left {rest:?} unconsumed");
    Ok(T::from_value(&value)?)
}

// Test decoding of top-level cells into Rust types
#[macro_export]
macro_rules! test_decode {
    ($name:ident<$ty:ty>($type_name:literal, $($text:literal == $value:expr),+ $(,)?)) => {
        $crate::paste::item! {
            #[test]
            fn [< test_decode_ $name >] () -> $crate::anyhow::Result<()> {
                let desc = $crate::ty($type_name);

                $(
                    let decoded: $ty = $crate::decode_as(&desc, $text)?;
                    println!("{} decoded from {:?}", $type_name, $text);

                    assert_eq!($value, decoded,
                            "value mismatch for {:?} as {}", $text, $type_name);
                )+

                Ok(())
            }
        }
    };

    ($name:ident($type_name:literal, $($text:literal == $value:expr),+ $(,)?)) => {
        $crate::test_decode!($name<$name>($type_name, $($text == $value),+));
    };
}
