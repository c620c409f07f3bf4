//! Types for working with errors produced by rowtext.

use std::num::TryFromIntError;

/// A specialized `Result` type for rowtext.
pub type Result<T> = std::result::Result<T, Error>;

/// Describe a character read from the cursor, where `None` is end of input.
fn describe(found: &Option<char>) -> String {
    match found {
        Some(c) => format!("character '{c}'"),
        None => "end of input".into(),
    }
}

/// Errors raised while compiling a decoder from a type descriptor.
///
/// These are permanent: a column whose type fails to compile cannot be decoded.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BuildError {
    #[error("type {0} is not supported")]
    Unsupported(String),

    #[error("{what} not specified for {type_name}")]
    MissingArgument {
        type_name: &'static str,
        what: &'static str,
    },

    #[error("malformed {what} specified for {type_name}: {value:?}")]
    MalformedArgument {
        type_name: &'static str,
        what: &'static str,
        value: String,
    },

    #[error("incorrect number of arguments for {type_name}: expected {expected}, found {found}")]
    Arity {
        type_name: &'static str,
        expected: &'static str,
        found: usize,
    },

    #[error("unknown time zone {0:?}")]
    UnknownTimezone(String),

    #[error("failed to create decoder for {context}: {source}")]
    Nested {
        context: &'static str,
        #[source]
        source: Box<BuildError>,
    },
}

impl BuildError {
    pub(crate) fn nested(context: &'static str) -> impl FnOnce(BuildError) -> BuildError {
        move |source| BuildError::Nested {
            context,
            source: Box::new(source),
        }
    }
}

/// Errors raised while decoding a single value.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum DecodeError {
    /// A structural token did not match the grammar.
    #[error("unexpected {}, expected '{expected}' {context} (position {position})", describe(.found))]
    Unexpected {
        found: Option<char>,
        expected: char,
        context: &'static str,
        position: usize,
    },

    #[error("unexpected string length {found}, expected {expected}")]
    Length { found: usize, expected: usize },

    #[error("incorrect escaping in string at position {position}: {reason}")]
    Escape { position: usize, reason: String },

    #[error("malformed number {text:?}: {reason}")]
    Number { text: String, reason: String },

    #[error("malformed boolean {0:?}")]
    Boolean(String),

    #[error("malformed date or datetime {text:?}: {reason}")]
    DateTime { text: String, reason: String },

    /// A decoder that cannot produce NULL produced one anyway.
    #[error("unexpected NULL from non-nullable element (position {position})")]
    UnexpectedNull { position: usize },

    #[error("failed to decode {context}: {source}")]
    Nested {
        context: &'static str,
        #[source]
        source: Box<DecodeError>,
    },

    #[error("incompatible value kind: expected {expected}, found {found}")]
    DataType {
        expected: &'static str,
        found: &'static str,
    },

    #[error("decoding conversion error: {0}")]
    Conversion(String),
}

impl DecodeError {
    pub(crate) fn nested(context: &'static str) -> impl FnOnce(DecodeError) -> DecodeError {
        move |source| DecodeError::Nested {
            context,
            source: Box::new(source),
        }
    }

    /// The innermost error, skipping any composite element context.
    pub fn root_cause(&self) -> &DecodeError {
        let mut err = self;
        while let DecodeError::Nested { source, .. } = err {
            err = source;
        }
        err
    }
}

impl From<TryFromIntError> for DecodeError {
    fn from(err: TryFromIntError) -> Self {
        DecodeError::Conversion(err.to_string())
    }
}

impl From<String> for DecodeError {
    fn from(err: String) -> Self {
        DecodeError::Conversion(err)
    }
}

/// Represents all the ways a method can fail within rowtext.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A decoder could not be constructed.
    #[error("error occurred while compiling decoder: {0}")]
    Build(#[from] BuildError),

    /// A value could not be decoded.
    #[error("error occurred while decoding: {0}")]
    Decode(#[from] DecodeError),

    /// The decoder for a named column could not be constructed.
    #[error("error occurred while compiling column {name}: {source}")]
    ColumnBuild {
        name: String,

        #[source]
        source: BuildError,
    },

    /// Error occurred while decoding a value from a specific column.
    #[error("error occurred while decoding column {index}: {source}")]
    ColumnDecode {
        index: String,

        #[source]
        source: DecodeError,
    },

    /// Column index was out of bounds.
    #[error("column index out of bounds: the len is {len}, but the index is {index}")]
    ColumnIndexOutOfBounds { index: usize, len: usize },

    /// No column found for the given name.
    #[error("no column found for name: {0}")]
    ColumnNotFound(String),

    /// A row did not carry one cell per column.
    #[error("row has {found} cells, but the result set has {expected} columns")]
    ColumnCount { expected: usize, found: usize },

    /// A connection parameter consumed by the decoder options was malformed.
    #[error("invalid value {value:?} for option {key}: {reason}")]
    Config {
        key: String,
        value: String,
        reason: String,
    },
}

impl Error {
    pub fn into_decode_error(self) -> Option<DecodeError> {
        match self {
            Error::Decode(err) | Error::ColumnDecode { source: err, .. } => Some(err),
            _ => None,
        }
    }
}
