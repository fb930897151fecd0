//! Converts entities to statement values and driver rows back to entities.

mod cache;
pub(crate) use cache::AccessorCache;

mod layout;
use layout::{Layout, Layouts};

mod record;
pub use record::RecordAccessor;

use crate::{Entity, Result};

use quill_core::{
    schema::EntityShape,
    stmt::{Row, Value},
};

use std::{fmt, marker::PhantomData, sync::Arc};

/// Compiled conversions between an entity type and its shape's columns.
///
/// Built once per shape. Row layouts seen by [`from_row`](Self::from_row)
/// are compiled on first sight and reused for every later row with the same
/// column list.
pub struct Accessor<E> {
    shape: Arc<EntityShape>,
    layouts: Layouts,
    _p: PhantomData<fn() -> E>,
}

impl<E: Entity> Accessor<E> {
    pub fn new(shape: Arc<EntityShape>) -> Self {
        Self {
            shape,
            layouts: Layouts::default(),
            _p: PhantomData,
        }
    }

    pub fn shape(&self) -> &Arc<EntityShape> {
        &self.shape
    }

    /// The entity's values in shape column order.
    pub fn to_row(&self, entity: &E) -> Vec<Value> {
        let mut values = entity.field_values();

        self.shape
            .columns
            .iter()
            .map(|column| match values.get_mut(column.member.index) {
                Some(value) => value.take(),
                None => Value::Null,
            })
            .collect()
    }

    /// Loads an entity from a driver row.
    ///
    /// Row columns are matched to shape columns ignoring ASCII case; extra
    /// row columns are ignored and members missing from the row take their
    /// default.
    pub fn from_row(&self, row: &Row) -> Result<E> {
        let layout = self.layout(row);
        let mut members = vec![None; self.shape.member_count];

        for (index, column) in layout.columns() {
            let column = &self.shape.columns[column];
            let value = layout.cast(&self.shape, column, &row.values()[index])?;
            members[column.member.index] = Some(value);
        }

        E::load(members)
    }

    fn layout(&self, row: &Row) -> Arc<Layout> {
        self.layouts.get_or_compile(&self.shape, row.columns())
    }

    /// Number of row layouts compiled so far.
    pub fn layout_count(&self) -> usize {
        self.layouts.len()
    }
}

impl<E> fmt::Debug for Accessor<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessor")
            .field("entity", &self.shape.name)
            .field("table", &self.shape.table)
            .finish()
    }
}
