//! Conversions from decoded values into Rust types.
//!
//! # Types
//!
//! | Rust type                             | Value variant(s)                   |
//! |---------------------------------------|------------------------------------|
//! | `bool`                                | `Bool`                             |
//! | `i8`, `i16`, `i32`, `i64`             | any integer, range checked         |
//! | `u8`, `u16`, `u32`, `u64`             | any integer, range checked         |
//! | `f32`, `f64`                          | `Float32`, `Float64`, any integer  |
//! | `&str`, [`String`]                    | `String`                           |
//! | `time::OffsetDateTime`                | `Timestamp`                        |
//! | `time::PrimitiveDateTime`             | `Timestamp`, in its own offset     |
//! | `time::Date`                          | `Timestamp`, in its own offset     |
//! | `Vec<T>`                              | `Array`                            |
//! | `IndexMap<K, V>`                      | `Map`                              |
//!
//! # Nullable
//!
//! `Option<T>` is supported where `T` implements `FromValue`. Extracting a
//! NULL into any other type is an error.

macro_rules! compatible {
    ($x:expr, $expected:literal, $($y:pat_param)|+) => {
        match $x {
            $($y)|+ => {}
            Value::Null => {
                return Err(DecodeError::Conversion("unexpected NULL".into()))
            }
            other => {
                return Err(DecodeError::DataType {
                    expected: $expected,
                    found: other.kind_name(),
                })
            }
        }
    };
}

use crate::{Value, error::DecodeError};

/// Fails unless `value` holds an integer of any width.
fn integer(value: &Value) -> Result<(), DecodeError> {
    compatible!(
        value,
        "integer",
        Value::Int8(_)
            | Value::Int16(_)
            | Value::Int32(_)
            | Value::Int64(_)
            | Value::UInt8(_)
            | Value::UInt16(_)
            | Value::UInt32(_)
            | Value::UInt64(_)
    );
    Ok(())
}

pub mod time;

mod bool;
mod collections;
mod float;
mod int;
mod str;
mod uint;
