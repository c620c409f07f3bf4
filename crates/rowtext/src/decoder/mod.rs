//! Decoders for the textual result format.
//!
//! A decoder is compiled once per column from the column's [`TypeDesc`] and
//! then invoked once per cell. Each call reads exactly one value from the
//! [`Cursor`] and leaves it positioned just past that value, before any
//! delimiter that follows.
//!
//! | Type                                           | Decoder                 | Value                |
//! |------------------------------------------------|-------------------------|----------------------|
//! | `Boolean`                                      | [`BoolDecoder`]         | `Bool`               |
//! | `Int8` .. `Int64`, `UInt8` .. `UInt64`         | [`IntDecoder`]          | `Int*`, `UInt*`      |
//! | `Float32`, `Float64`                           | [`FloatDecoder`]        | `Float32`, `Float64` |
//! | `String`, `FixedString(N)`, `Decimal`, `UUID`… | [`StringDecoder`]       | `String`             |
//! | `Date`, `DateTime`, `DateTime64`, `Timestamp`  | [`DateTimeDecoder`]     | `Timestamp`          |
//! | `Array(T)`                                     | [`ArrayDecoder`]        | `Array`              |
//! | `Tuple(T1, ..)`                                | [`TupleDecoder`]        | `Tuple`              |
//! | `Map(K, V)`                                    | [`MapDecoder`]          | `Map`                |
//! | `Nullable(T)`, `NULL`                          | [`NullableDecoder`]     | inner or `Null`      |
//! | `Nothing`                                      | [`NothingDecoder`]      | `Null`               |
//!
//! [`TypeDesc`]: crate::TypeDesc

use std::fmt::Debug;

use crate::{Cursor, Kind, Value, error::DecodeError};

mod array;
mod boolean;
mod compile;
mod datetime;
mod map;
mod nullable;
mod number;
mod string;
mod tuple;

pub use array::ArrayDecoder;
pub use boolean::BoolDecoder;
pub use compile::{column_decoder, compile};
pub use datetime::{DateTimeDecoder, DateTimeFormat};
pub use map::MapDecoder;
pub use nullable::{NothingDecoder, NullableDecoder};
pub use number::{FloatDecoder, IntDecoder, IntType};
pub use string::StringDecoder;
pub use tuple::TupleDecoder;

pub(crate) use boolean::parse_bool;

/// A compiled strategy for decoding one value of a specific column type.
///
/// Decoders hold only configuration and child decoders, so a compiled tree
/// can be shared between threads as long as each call uses its own cursor.
pub trait Decoder: Debug + Send + Sync {
    /// Decode one value, leaving the cursor just past it.
    fn decode(&self, cursor: &mut Cursor<'_>) -> Result<Value, DecodeError>;

    /// Whether this decoder can produce [`Value::Null`].
    fn is_nullable(&self) -> bool {
        false
    }

    /// The kind of value this decoder produces.
    fn kind(&self) -> Kind;
}

pub type BoxDecoder = Box<dyn Decoder>;
