use std::{collections::HashMap, sync::Arc};

use crate::{
    Cursor, DecodeOptions, Result, Row, TypeDesc, Value,
    decoder::{BoxDecoder, column_decoder},
    error::{DecodeError, Error},
};

/// A result set column with its compiled decoder.
#[derive(Debug)]
pub struct Column {
    name: String,
    type_desc: TypeDesc,
    decoder: BoxDecoder,
}

impl Column {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_desc(&self) -> &TypeDesc {
        &self.type_desc
    }

    pub fn decoder(&self) -> &dyn crate::Decoder {
        self.decoder.as_ref()
    }

    pub fn is_nullable(&self) -> bool {
        self.decoder.is_nullable()
    }

    fn decode(&self, cell: Option<&str>) -> std::result::Result<Value, DecodeError> {
        match cell {
            Some(text) => self.decoder.decode(&mut Cursor::new(text)),
            None if self.is_nullable() => Ok(Value::Null),
            None => Err(DecodeError::UnexpectedNull { position: 0 }),
        }
    }
}

/// The columns of a result set, compiled once and shared by every row.
#[derive(Debug, Clone)]
pub struct Columns {
    columns: Arc<Vec<Column>>,
    column_names: Arc<HashMap<String, usize>>,
}

impl Columns {
    /// Compile a decoder for each `(name, type)` pair of a result set.
    pub fn compile<I, N>(columns: I, options: &DecodeOptions) -> Result<Self>
    where
        I: IntoIterator<Item = (N, TypeDesc)>,
        N: Into<String>,
    {
        let mut compiled = Vec::new();
        let mut column_names = HashMap::new();

        for (i, (name, type_desc)) in columns.into_iter().enumerate() {
            let name = name.into();
            let decoder = match column_decoder(&type_desc, options) {
                Ok(decoder) => decoder,
                Err(source) => {
                    tracing::debug!(
                        target: "rowtext::column",
                        column = %name,
                        ty = %type_desc,
                        error = %source,
                        "failed to compile column decoder"
                    );
                    return Err(Error::ColumnBuild { name, source });
                }
            };
            // the first of several equally named columns wins lookups by name
            column_names.entry(name.clone()).or_insert(i);
            compiled.push(Column {
                name,
                type_desc,
                decoder,
            });
        }

        Ok(Self {
            columns: Arc::new(compiled),
            column_names: Arc::new(column_names),
        })
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Decode one row of cell texts, one per column. `None` is a NULL
    /// delivered outside the text itself.
    pub fn decode_row(&self, cells: &[Option<&str>]) -> Result<Row> {
        if cells.len() != self.columns.len() {
            return Err(Error::ColumnCount {
                expected: self.columns.len(),
                found: cells.len(),
            });
        }

        let mut values = Vec::with_capacity(cells.len());
        for (column, cell) in self.columns.iter().zip(cells) {
            match column.decode(*cell) {
                Ok(value) => values.push(value),
                Err(source) => {
                    tracing::debug!(
                        target: "rowtext::row",
                        column = %column.name,
                        ty = %column.type_desc,
                        cell = ?cell,
                        error = %source,
                        "failed to decode cell"
                    );
                    return Err(Error::ColumnDecode {
                        index: format!("{:?}", column.name),
                        source,
                    });
                }
            }
        }

        Ok(Row::new(
            values,
            Arc::clone(&self.columns),
            Arc::clone(&self.column_names),
        ))
    }
}
