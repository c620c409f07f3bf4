use std::{collections::HashMap, sync::Arc};

use crate::{Column, FromValue, Result, Value, error::Error};

/// One decoded row of a result set.
#[derive(Debug, Clone)]
pub struct Row {
    values: Box<[Value]>,
    columns: Arc<Vec<Column>>,
    column_names: Arc<HashMap<String, usize>>,
}

impl Row {
    pub(crate) fn new(
        values: Vec<Value>,
        columns: Arc<Vec<Column>>,
        column_names: Arc<HashMap<String, usize>>,
    ) -> Self {
        Self {
            values: values.into_boxed_slice(),
            columns,
            column_names,
        }
    }

    /// Returns the values for this row.
    pub fn values(&self) -> &[Value] {
        self.values.as_ref()
    }

    /// Returns the column definitions for this row.
    pub fn columns(&self) -> &[Column] {
        self.columns.as_ref()
    }

    /// Returns `true` if this row has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Consume the row, keeping only its values.
    pub fn into_values(self) -> Vec<Value> {
        self.values.into_vec()
    }

    /// Get a single value from the row by column index.
    pub fn get_value_idx<'r, T>(&'r self, index: usize) -> Result<T>
    where
        T: FromValue<'r>,
    {
        let value = if let Some(v) = self.values.get(index) {
            v
        } else {
            return Err(Error::ColumnIndexOutOfBounds {
                index,
                len: self.values.len(),
            });
        };

        T::from_value(value).map_err(|source| Error::ColumnDecode {
            index: format!("{index:?}"),
            source,
        })
    }

    /// Get a single value from the row by column name.
    pub fn get_value<'r, T>(&'r self, column: &str) -> Result<T>
    where
        T: FromValue<'r>,
    {
        self.get_value_idx(
            *self
                .column_names
                .get(column)
                .ok_or_else(|| Error::ColumnNotFound(column.into()))?,
        )
    }
}
