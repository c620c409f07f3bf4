//! Integration tests for primitive column types.

#[cfg(test)]
mod tests {
    // Allow approximate constants in this test file - we're testing specific float representations
    #![allow(clippy::approx_constant)]

    use rand::{Rng, SeedableRng};
    use rand_xoshiro::Xoshiro256PlusPlus;
    use rowtext::{DecodeError, DecodeOptions, Error, Value};
    use rowtext_test::{decode, decode_as, decode_with, test_decode, ty};

    test_decode!(bool(
        "Boolean",
        "1" == true,
        "t" == true,
        "T" == true,
        "TRUE" == true,
        "true" == true,
        "True" == true,
        "0" == false,
        "f" == false,
        "F" == false,
        "FALSE" == false,
        "false" == false,
        "False" == false,
    ));

    test_decode!(i8("Int8", "-128" == i8::MIN, "127" == i8::MAX, "0" == 0i8));

    test_decode!(i16("Int16", "-32768" == i16::MIN, "32767" == i16::MAX));

    test_decode!(i32("Int32", "94101" == 94101_i32, "-2147483648" == i32::MIN));

    test_decode!(i64("Int64", "9358295312" == 9358295312_i64, "-1" == -1_i64));

    test_decode!(u8("UInt8", "255" == u8::MAX));

    test_decode!(u32("UInt32", "4294967295" == u32::MAX));

    test_decode!(u64("UInt64", "9007199254740992" == 9007199254740992_u64));

    test_decode!(f32("Float32", "3.141" == 3.141_f32, "-0.5" == -0.5_f32));

    test_decode!(f64(
        "Float64",
        "939399419.1225182" == 939399419.1225182_f64,
        "1e-7" == 1e-7_f64,
        "inf" == f64::INFINITY,
    ));

    test_decode!(str<String>(
        "String",
        "this is foo" == "this is foo",
        "" == "",
        "tab\\there" == "tab\there",
        "\\x41\\'\\\\" == "A'\\",
        "commas, colons: and ]brackets)" == "commas, colons: and ]brackets)",
        "NULL" == "NULL",
        "\\N" == "N",
    ));

    test_decode!(fixed_string<String>("FixedString(3)", "abc" == "abc", "a\\tb" == "a\tb"));

    test_decode!(opaque<String>(
        "Decimal(10, 2)",
        "12.50" == "12.50",
        "-0.01" == "-0.01",
    ));

    test_decode!(uuid<String>(
        "UUID",
        "0f1e2d3c-4b5a-6978-8796-a5b4c3d2e1f0" == "0f1e2d3c-4b5a-6978-8796-a5b4c3d2e1f0",
    ));

    #[test]
    fn seeded_round_trip() -> anyhow::Result<()> {
        // Deterministic seed so this is stable under CI.
        let seed: [u8; 32] = [0x42; 32];
        let mut rng = Xoshiro256PlusPlus::from_seed(seed);

        let (int8, int32, int64) = (ty("Int8"), ty("Int32"), ty("Int64"));
        let (uint16, uint64) = (ty("UInt16"), ty("UInt64"));
        let (float32, float64) = (ty("Float32"), ty("Float64"));

        for _ in 0..1_000 {
            let v: i8 = rng.random();
            assert_eq!(decode_as::<i8>(&int8, &v.to_string())?, v);
            let v: i32 = rng.random();
            assert_eq!(decode_as::<i32>(&int32, &v.to_string())?, v);
            let v: u16 = rng.random();
            assert_eq!(decode_as::<u16>(&uint16, &v.to_string())?, v);

            // 64-bit values round-trip while they fit the float intermediate
            let v = rng.random_range(-(1i64 << 53)..=(1i64 << 53));
            assert_eq!(decode_as::<i64>(&int64, &v.to_string())?, v);
            let v = rng.random_range(0..=(1u64 << 53));
            assert_eq!(decode_as::<u64>(&uint64, &v.to_string())?, v);

            let v: f32 = rng.random_range(-1e6..1e6);
            assert_eq!(decode_as::<f32>(&float32, &v.to_string())?, v);
            let v: f64 = rng.random_range(-1e12..1e12);
            assert_eq!(decode_as::<f64>(&float64, &v.to_string())?, v);
        }

        Ok(())
    }

    #[test]
    fn integer_precision_boundary() -> anyhow::Result<()> {
        let int64 = ty("Int64");
        let above = "9007199254740993";

        let (value, _) = decode(&int64, above)?;
        assert_eq!(value, Value::Int64(9007199254740992));

        let options = DecodeOptions::new().exact_integers(true);
        let (value, _) = decode_with(&int64, &options, false, above)?;
        assert_eq!(value, Value::Int64(9007199254740993));

        let (value, _) = decode_with(&ty("UInt64"), &options, false, "18446744073709551615")?;
        assert_eq!(value, Value::UInt64(u64::MAX));

        // the exact path rejects what the float path truncates
        assert!(matches!(
            decode_with(&ty("Int32"), &options, false, "1.5"),
            Err(Error::Decode(DecodeError::Number { .. }))
        ));
        let (value, _) = decode(&ty("Int32"), "1.5")?;
        assert_eq!(value, Value::Int32(1));

        Ok(())
    }

    #[test]
    fn malformed_primitives() {
        match decode(&ty("Int32"), "abc") {
            Err(Error::Decode(DecodeError::Number { text, .. })) => assert_eq!(text, "abc"),
            other => panic!("expected a number error, got {other:?}"),
        }
        match decode(&ty("Boolean"), "yes") {
            Err(Error::Decode(DecodeError::Boolean(text))) => assert_eq!(text, "yes"),
            other => panic!("expected a boolean error, got {other:?}"),
        }
        assert!(matches!(
            decode(&ty("Float64"), ""),
            Err(Error::Decode(DecodeError::Number { .. }))
        ));
        assert!(matches!(
            decode(&ty("String"), "bad\\x4"),
            Err(Error::Decode(DecodeError::Escape { .. }))
        ));
        assert!(matches!(
            decode(&ty("String"), "trailing\\"),
            Err(Error::Decode(DecodeError::Escape { .. }))
        ));
        assert!(matches!(
            decode(&ty("FixedString(4)"), "abc"),
            Err(Error::Decode(DecodeError::Length {
                found: 3,
                expected: 4
            }))
        ));
    }

    #[test]
    fn tokens_stop_at_delimiters() -> anyhow::Result<()> {
        for (name, text, rest) in [
            ("Int32", "12,3", ",3"),
            ("Int32", "12]", "]"),
            ("Int32", "12)", ")"),
            ("Int32", "12}", "}"),
            ("Int32", "12:", ":"),
            ("Float64", "1.5,", ","),
            ("Boolean", "true}", "}"),
        ] {
            let (_, remaining) = decode(&ty(name), text)?;
            assert_eq!(remaining, rest, "{name} on {text:?}");
        }
        Ok(())
    }
}
