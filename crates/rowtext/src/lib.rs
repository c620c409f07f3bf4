//! Decoders for the textual query-result format of a SQL engine.
//!
//! A column's declared type, parsed into a [`TypeDesc`], is compiled once
//! into a [`Decoder`] tree. Each cell of that column is then decoded from a
//! [`Cursor`] into a [`Value`], which can be extracted into Rust types with
//! [`FromValue`].
//!
//! ```
//! use rowtext::{Columns, DecodeOptions, TypeDesc};
//!
//! let columns = Columns::compile(
//!     [
//!         ("id", TypeDesc::new("UInt64")),
//!         ("tags", TypeDesc::array(TypeDesc::new("String").nullable())),
//!     ],
//!     &DecodeOptions::default(),
//! )?;
//! let row = columns.decode_row(&[Some("7"), Some("['a',NULL]")])?;
//! assert_eq!(row.get_value::<u64>("id")?, 7);
//! assert_eq!(
//!     row.get_value::<Vec<Option<String>>>("tags")?,
//!     vec![Some("a".to_string()), None]
//! );
//! # Ok::<(), rowtext::Error>(())
//! ```

mod column;
mod cursor;
pub mod decoder;
mod error;
mod from_value;
mod options;
mod row;
mod type_desc;
pub mod types;
mod value;

pub use crate::{
    column::{Column, Columns},
    cursor::{Cursor, LOOKAHEAD},
    decoder::{BoxDecoder, Decoder, column_decoder, compile},
    error::{BuildError, DecodeError, Error, Result},
    from_value::FromValue,
    options::{DecodeOptions, Location},
    row::Row,
    type_desc::TypeDesc,
    value::{Kind, Value, ZERO_TIMESTAMP},
};
