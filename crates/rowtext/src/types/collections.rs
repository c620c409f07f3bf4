use std::hash::Hash;

use indexmap::IndexMap;

use crate::{FromValue, Value, error::DecodeError};

impl<'r, T> FromValue<'r> for Vec<T>
where
    T: FromValue<'r>,
{
    fn from_value(value: &'r Value) -> Result<Self, DecodeError> {
        compatible!(value, "Array", Value::Array(_));
        let Value::Array(items) = value else {
            return Ok(Vec::new());
        };
        items.iter().map(T::from_value).collect()
    }
}

/// Map entries keep the order in which they were decoded.
impl<'r, K, V> FromValue<'r> for IndexMap<K, V>
where
    K: FromValue<'r> + Hash + Eq,
    V: FromValue<'r>,
{
    fn from_value(value: &'r Value) -> Result<Self, DecodeError> {
        compatible!(value, "Map", Value::Map(_));
        let Value::Map(entries) = value else {
            return Ok(IndexMap::new());
        };
        entries
            .iter()
            .map(|(k, v)| -> Result<(K, V), DecodeError> {
                Ok((K::from_value(k)?, V::from_value(v)?))
            })
            .collect()
    }
}
