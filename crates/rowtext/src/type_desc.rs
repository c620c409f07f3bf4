use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// The parsed form of a column's declared type, such as
/// `Nullable(Array(Int32))`.
///
/// Descriptors are produced by the type-name parser that reads result set
/// metadata. Literal arguments (string lengths, precisions, time zone names)
/// are represented as argument descriptors whose `name` is the literal text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeDesc {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<TypeDesc>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub nullable: bool,
}

impl TypeDesc {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            nullable: false,
        }
    }

    /// A parameterized type such as `FixedString(16)` or `Map(K, V)`.
    pub fn with_args(name: impl Into<String>, args: impl IntoIterator<Item = TypeDesc>) -> Self {
        Self {
            name: name.into(),
            args: args.into_iter().collect(),
            nullable: false,
        }
    }

    /// A literal argument, e.g. the `3` in `DateTime64(3)`.
    pub fn literal(text: impl ToString) -> Self {
        Self::new(text.to_string())
    }

    pub fn array(element: TypeDesc) -> Self {
        Self::with_args("Array", [element])
    }

    pub fn tuple(elements: impl IntoIterator<Item = TypeDesc>) -> Self {
        Self::with_args("Tuple", elements)
    }

    pub fn map(key: TypeDesc, value: TypeDesc) -> Self {
        Self::with_args("Map", [key, value])
    }

    /// Wrap `inner` in an explicit `Nullable(...)` descriptor.
    pub fn nullable_of(inner: TypeDesc) -> Self {
        Self::with_args("Nullable", [inner])
    }

    /// Set the nullable flag, the flag form of `Nullable(...)`.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}

impl Display for TypeDesc {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.nullable {
            f.write_str("Nullable(")?;
        }
        f.write_str(&self.name)?;
        if !self.args.is_empty() {
            f.write_str("(")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{arg}")?;
            }
            f.write_str(")")?;
        }
        if self.nullable {
            f.write_str(")")?;
        }
        Ok(())
    }
}
