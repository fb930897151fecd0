use super::{Layout, Layouts};
use crate::Result;

use quill_core::{
    schema::EntityShape,
    stmt::{Record, Row, Value},
};

use std::sync::Arc;

/// Compiled conversions between dynamic records and a shape's columns.
#[derive(Debug)]
pub struct RecordAccessor {
    shape: Arc<EntityShape>,
    layouts: Layouts,
}

impl RecordAccessor {
    pub fn new(shape: Arc<EntityShape>) -> Self {
        Self {
            shape,
            layouts: Layouts::default(),
        }
    }

    pub fn shape(&self) -> &Arc<EntityShape> {
        &self.shape
    }

    /// The record's values in shape column order. Fields are matched by
    /// member name ignoring ASCII case; absent fields are `Null`.
    pub fn to_row(&self, record: &Record) -> Vec<Value> {
        self.shape
            .columns
            .iter()
            .map(|column| {
                record
                    .get_ignore_case(&column.member.name)
                    .cloned()
                    .unwrap_or_default()
            })
            .collect()
    }

    /// Loads a record holding every mapped member of the shape. Members the
    /// row does not carry are `Null`.
    pub fn from_row(&self, row: &Row) -> Result<Record> {
        let layout = self.layout(row);
        let mut values = vec![Value::Null; self.shape.columns.len()];

        for (index, column) in layout.columns() {
            values[column] = layout.cast(&self.shape, &self.shape.columns[column], &row.values()[index])?;
        }

        Ok(self
            .shape
            .columns
            .iter()
            .zip(values)
            .map(|(column, value)| (column.member.name.clone(), value))
            .collect())
    }

    fn layout(&self, row: &Row) -> Arc<Layout> {
        self.layouts.get_or_compile(&self.shape, row.columns())
    }
}
